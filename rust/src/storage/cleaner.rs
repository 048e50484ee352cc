// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deletion of table and partition data under catalog-reported locations.
//!
//! Prefixes to delete are only ever taken from the locations Glue reports
//! for a table or its partitions. Keys are listed under the prefix first and
//! then removed with `DeleteObjects`, at most [`DELETE_BATCH_SIZE`] keys per
//! request.

use crate::connection::ConnectionContext;
use crate::error::Result;
use crate::storage::location::{parse_s3_location, S3Location};
use tracing::debug;

/// Maximum number of keys of one `DeleteObjects` request.
pub const DELETE_BATCH_SIZE: usize = 1000;

#[derive(Debug)]
pub struct StorageCleaner<'a> {
    ctx: &'a ConnectionContext,
}

impl<'a> StorageCleaner<'a> {
    pub fn new(ctx: &'a ConnectionContext) -> Self {
        Self { ctx }
    }

    /// Delete the data of every partition of `database`.`table` matching
    /// `where_condition`.
    pub fn clean_up_partitions(
        &self,
        database: &str,
        table: &str,
        where_condition: &str,
    ) -> Result<()> {
        let glue = self.ctx.glue();
        let mut next_token: Option<String> = None;
        loop {
            let page = self.ctx.block_on(glue.get_partitions(
                database,
                table,
                where_condition,
                next_token.as_deref(),
            ))?;
            for partition in &page.partitions {
                let location = partition.location().unwrap_or_default();
                debug!(
                    "Deleting objects for partition '{:?}' at '{}'",
                    partition.values, location
                );
                self.delete_location(location)?;
            }
            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }
        Ok(())
    }

    /// Delete all data of `database`.`table`. A table Glue does not know is
    /// nothing to clean.
    pub fn clean_up_table(&self, database: &str, table: &str) -> Result<()> {
        let described = match self.ctx.block_on(self.ctx.glue().get_table(database, table)) {
            Ok(described) => described,
            Err(e) if e.is_entity_not_found() => {
                debug!("Table '{}' does not exists - Ignoring", table);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let location = described.location().unwrap_or_default();
        debug!("Deleting table data from '{}'", location);
        self.delete_location(location)
    }

    fn delete_location(&self, location: &str) -> Result<()> {
        match parse_s3_location(location) {
            Some(target) => self.delete_prefix(&target),
            None => {
                debug!("Skipping location '{}': not an s3:// path", location);
                Ok(())
            }
        }
    }

    /// List every key under the prefix, then delete them in batches.
    fn delete_prefix(&self, target: &S3Location) -> Result<()> {
        let store = self.ctx.object_store();
        let mut keys = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let listing = self.ctx.block_on(store.list_objects(
                &target.bucket,
                &target.prefix,
                token.as_deref(),
            ))?;
            keys.extend(listing.keys);
            match listing.next_continuation_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!(
            "Deleting {} objects under s3://{}/{}",
            keys.len(),
            target.bucket,
            target.prefix
        );
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            self.ctx
                .block_on(store.delete_objects(&target.bucket, batch))?;
        }
        Ok(())
    }
}
