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

//! Paginated table and database retrieval from Glue.
//!
//! [`GlueTables`] turns the page-level [`crate::client::GlueClient`] into a
//! lazy iterator of table descriptions. Each page fetch blocks the caller on
//! the context's runtime; nothing is fetched until the iterator is polled,
//! and every call to [`GlueTables::iter`] starts again from the first page.
//!
//! ## Example
//!
//! ```ignore
//! let tables = GlueTables::new(&ctx, "awsdatacatalog", "analytics")?;
//! for table in tables.iter() {
//!     let table = table?;
//!     println!("{}", table.name);
//! }
//! ```

use crate::config::DEFAULT_DATA_CATALOG;
use crate::connection::ConnectionContext;
use crate::error::{Error, Result};
use crate::types::glue::GlueTable;
use std::collections::VecDeque;
use tracing::debug;

/// `MaxResults` sent with every `GetTables` / `GetDatabases` request.
pub const GLUE_PAGE_SIZE: i32 = 50;

/// Catalog id to send to Glue: omitted for the caller's own catalog.
fn catalog_id_param(catalog_id: &str) -> Option<&str> {
    if catalog_id == DEFAULT_DATA_CATALOG {
        None
    } else {
        Some(catalog_id)
    }
}

fn require_catalog_id(catalog_id: &str, operation: &str) -> Result<()> {
    if catalog_id.is_empty() {
        return Err(Error::invalid_argument(format!(
            "Glue {}: Need catalog id",
            operation
        )));
    }
    Ok(())
}

/// Table descriptions of one Glue database (Athena schema).
#[derive(Debug)]
pub struct GlueTables<'a> {
    ctx: &'a ConnectionContext,
    catalog_id: String,
    schema: String,
}

impl<'a> GlueTables<'a> {
    /// Validate the identifiers; no remote call is made here.
    pub fn new(ctx: &'a ConnectionContext, catalog_id: &str, schema: &str) -> Result<Self> {
        require_catalog_id(catalog_id, "GetTables")?;
        if schema.is_empty() {
            return Err(Error::invalid_argument("Glue GetTables: Need database name"));
        }
        Ok(Self {
            ctx,
            catalog_id: catalog_id.to_string(),
            schema: schema.to_string(),
        })
    }

    /// Iterate over all tables, fetching pages on demand.
    pub fn iter(&self) -> GlueTableIter<'_> {
        debug!(
            "Get relations of schema through Glue API: catalog={}, name={}",
            self.catalog_id, self.schema
        );
        GlueTableIter {
            ctx: self.ctx,
            catalog_id: catalog_id_param(&self.catalog_id),
            schema: &self.schema,
            buffer: VecDeque::new(),
            next_token: None,
            exhausted: false,
        }
    }
}

impl<'s> IntoIterator for &'s GlueTables<'_> {
    type Item = Result<GlueTable>;
    type IntoIter = GlueTableIter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`GlueTables`]. Stops after the first error.
pub struct GlueTableIter<'a> {
    ctx: &'a ConnectionContext,
    catalog_id: Option<&'a str>,
    schema: &'a str,
    buffer: VecDeque<GlueTable>,
    next_token: Option<String>,
    exhausted: bool,
}

impl Iterator for GlueTableIter<'_> {
    type Item = Result<GlueTable>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(table) = self.buffer.pop_front() {
                return Some(Ok(table));
            }
            if self.exhausted {
                return None;
            }

            let page = self.ctx.block_on(self.ctx.glue().get_tables(
                self.catalog_id,
                self.schema,
                GLUE_PAGE_SIZE,
                self.next_token.as_deref(),
            ));
            match page {
                Ok(page) => {
                    self.buffer.extend(page.tables);
                    self.next_token = page.next_token;
                    self.exhausted = self.next_token.is_none();
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// All database (schema) names of a catalog, in service order.
pub fn list_glue_databases(ctx: &ConnectionContext, catalog_id: &str) -> Result<Vec<String>> {
    require_catalog_id(catalog_id, "GetDatabases")?;
    debug!("List schemas through Glue API: catalog={}", catalog_id);

    let catalog = catalog_id_param(catalog_id);
    let mut names = Vec::new();
    let mut next_token: Option<String> = None;
    loop {
        let page = ctx.block_on(ctx.glue().get_databases(
            catalog,
            GLUE_PAGE_SIZE,
            next_token.as_deref(),
        ))?;
        names.extend(page.names);
        match page.next_token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }
    Ok(names)
}
