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

//! [`GlueClient`] over `aws-sdk-glue`.

use crate::client::GlueClient;
use crate::error::{Error, Result};
use crate::types::glue::{
    DatabasePage, GlueColumn, GluePartition, GlueTable, PartitionPage, StorageDescriptor,
    TablePage,
};
use async_trait::async_trait;
use aws_sdk_glue::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_glue::primitives::DateTime as SdkDateTime;
use aws_sdk_glue::types as sdk;
use aws_sdk_glue::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Glue client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsGlueClient {
    client: Client,
}

impl AwsGlueClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

/// Convert an SDK failure into a tagged catalog access error.
fn access_error<E, R>(op: &str, err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let (code, message) = match &err {
        SdkError::ServiceError(e) => (
            e.err().code().unwrap_or("UnknownServiceError").to_string(),
            e.err()
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(&err).to_string()),
        ),
        SdkError::TimeoutError(_) => (
            "TimeoutError".to_string(),
            DisplayErrorContext(&err).to_string(),
        ),
        SdkError::DispatchFailure(_) => (
            "DispatchFailure".to_string(),
            DisplayErrorContext(&err).to_string(),
        ),
        _ => ("UnknownError".to_string(), DisplayErrorContext(&err).to_string()),
    };
    debug!("Glue {} failed: code={}, message={}", op, code, message);
    Error::catalog_access(code, message)
}

fn convert_time(time: Option<&SdkDateTime>) -> Option<DateTime<Utc>> {
    time.and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
}

fn convert_column(column: &sdk::Column) -> GlueColumn {
    GlueColumn {
        name: column.name().to_string(),
        r#type: column.r#type().unwrap_or_default().to_string(),
        comment: column.comment().map(str::to_string),
    }
}

fn convert_descriptor(descriptor: Option<&sdk::StorageDescriptor>) -> StorageDescriptor {
    match descriptor {
        Some(d) => StorageDescriptor {
            columns: d.columns().iter().map(convert_column).collect(),
            location: d.location().map(str::to_string),
            compressed: d.compressed(),
        },
        None => StorageDescriptor::default(),
    }
}

fn convert_table(table: &sdk::Table) -> GlueTable {
    GlueTable {
        name: table.name().to_string(),
        database_name: table.database_name().map(str::to_string),
        table_type: table.table_type().map(str::to_string),
        description: table.description().map(str::to_string),
        owner: table.owner().map(str::to_string),
        create_time: convert_time(table.create_time()),
        update_time: convert_time(table.update_time()),
        created_by: table.created_by().map(str::to_string),
        storage_descriptor: convert_descriptor(table.storage_descriptor()),
        partition_keys: table.partition_keys().iter().map(convert_column).collect(),
    }
}

fn convert_partition(partition: &sdk::Partition) -> GluePartition {
    GluePartition {
        values: partition.values().to_vec(),
        storage_descriptor: convert_descriptor(partition.storage_descriptor()),
    }
}

#[async_trait]
impl GlueClient for AwsGlueClient {
    async fn get_tables(
        &self,
        catalog_id: Option<&str>,
        database: &str,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<TablePage> {
        let output = self
            .client
            .get_tables()
            .set_catalog_id(catalog_id.map(str::to_string))
            .database_name(database)
            .max_results(max_results)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| access_error("GetTables", e))?;

        Ok(TablePage {
            tables: output.table_list().iter().map(convert_table).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn get_databases(
        &self,
        catalog_id: Option<&str>,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<DatabasePage> {
        let output = self
            .client
            .get_databases()
            .set_catalog_id(catalog_id.map(str::to_string))
            .max_results(max_results)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| access_error("GetDatabases", e))?;

        Ok(DatabasePage {
            names: output
                .database_list()
                .iter()
                .map(|db| db.name().to_string())
                .collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn get_table(&self, database: &str, name: &str) -> Result<GlueTable> {
        let output = self
            .client
            .get_table()
            .database_name(database)
            .name(name)
            .send()
            .await
            .map_err(|e| access_error("GetTable", e))?;

        output.table().map(convert_table).ok_or_else(|| {
            Error::catalog_access(
                crate::error::ENTITY_NOT_FOUND,
                format!("GetTable returned no table for {}.{}", database, name),
            )
        })
    }

    async fn get_partitions(
        &self,
        database: &str,
        table: &str,
        expression: &str,
        next_token: Option<&str>,
    ) -> Result<PartitionPage> {
        let output = self
            .client
            .get_partitions()
            .database_name(database)
            .table_name(table)
            .expression(expression)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| access_error("GetPartitions", e))?;

        Ok(PartitionPage {
            partitions: output.partitions().iter().map(convert_partition).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }
}
