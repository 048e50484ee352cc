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

//! Clients for the remote services the adapter reads and cleans.
//!
//! This module provides:
//! - `GlueClient` trait: page-level access to the Glue Data Catalog
//! - `ObjectStore` trait: listing and deleting S3 objects under a prefix
//! - `AwsGlueClient` / `AwsS3Client`: implementations over the AWS SDK
//!
//! Each call maps to exactly one remote request. Pagination is driven by the
//! callers in [`crate::metadata`] and [`crate::storage`]; retries and backoff
//! belong to the SDK transport.

pub mod glue;
pub mod s3;

use crate::error::Result;
use crate::types::glue::{DatabasePage, GlueTable, PartitionPage, TablePage};
use async_trait::async_trait;

pub use glue::AwsGlueClient;
pub use s3::AwsS3Client;

/// One page of `ListObjectsV2`.
#[derive(Debug, Clone, Default)]
pub struct ObjectListing {
    pub keys: Vec<String>,
    pub next_continuation_token: Option<String>,
}

/// Abstract interface for the Glue Data Catalog.
///
/// Failures are reported as [`crate::Error::CatalogAccess`] carrying the
/// service error code and message.
#[async_trait]
pub trait GlueClient: Send + Sync + std::fmt::Debug {
    /// Fetch one page of table descriptions of `database`.
    ///
    /// `catalog_id` is `None` for the caller's own account.
    async fn get_tables(
        &self,
        catalog_id: Option<&str>,
        database: &str,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<TablePage>;

    /// Fetch one page of database (schema) names.
    async fn get_databases(
        &self,
        catalog_id: Option<&str>,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<DatabasePage>;

    /// Describe a single table.
    async fn get_table(&self, database: &str, name: &str) -> Result<GlueTable>;

    /// Fetch one page of the partitions of a table matching `expression`.
    async fn get_partitions(
        &self,
        database: &str,
        table: &str,
        expression: &str,
        next_token: Option<&str>,
    ) -> Result<PartitionPage>;
}

/// Abstract interface for S3 object listing and deletion.
///
/// Failures are reported as [`crate::Error::ObjectStore`].
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug {
    /// List one page of object keys under `prefix` in `bucket`.
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectListing>;

    /// Delete `keys` from `bucket` in a single request (at most 1000 keys).
    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<()>;
}
