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

//! Athena adapter metadata layer for Rust
//!
//! This crate implements the catalog-facing half of an Athena adapter for a
//! SQL build tool: relation discovery and catalog assembly through the AWS
//! Glue Data Catalog, with a SQL fallback, plus the S3 housekeeping of
//! managed tables.
//!
//! ## Overview
//!
//! - [`AthenaAdapter`] - Operations called by the host tool
//! - [`ConnectionContext`] - Credentials, Glue and S3 clients of a unit of work
//! - [`SqlExecutor`] - The host tool's SQL execution, used as fallback
//! - [`CatalogFilter`] / [`RelationSource`] - Pluggable capabilities
//!
//! ## Features
//!
//! - **Glue first**: relations and catalogs are read from Glue `GetTables`;
//!   on access errors the same result is produced by SQL instead
//! - **Catalog tables**: one Arrow row per column with table statistics
//! - **Table locations**: `schema_table` or `uuid` naming under the data dir
//! - **Cleanup**: deletion of table and partition data under the locations
//!   Glue reports
//!
//! ## Example
//!
//! ```ignore
//! use athena_adapter::{AthenaAdapter, AthenaCredentials, ConnectionContext};
//!
//! let credentials = AthenaCredentials::new("analytics", "s3://my-bucket/athena/")
//!     .with_s3_data_naming("schema_table");
//! let ctx = ConnectionContext::connect(credentials)?;
//! let adapter = AthenaAdapter::new(Arc::new(my_sql_executor));
//!
//! adapter.clean_up_table(&ctx, "analytics", "events")?;
//! let location = adapter.storage_table_location(&ctx, "analytics", "events")?;
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `athena.database` | `awsdatacatalog` | Data catalog name |
//! | `athena.schema` | | Default schema |
//! | `athena.s3_staging_dir` | | Query result location |
//! | `athena.s3_data_dir` | | Table data root; `s3_staging_dir/tables/` when unset |
//! | `athena.s3_data_naming` | `schema_table` | `schema_table` or `uuid` |
//! | `athena.region_name` | | AWS region |
//! | `athena.aws_profile_name` | | AWS shared config profile |
//! | `athena.work_group` | | Athena work group |
//! | `athena.log_level` | | Log level (`off`, `error`, ..., `trace`) |
//! | `athena.log_file` | | Log to this file instead of stderr |

pub mod adapter;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod relation;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use adapter::AthenaAdapter;
pub use config::{AthenaCredentials, S3DataNaming};
pub use connection::ConnectionContext;
pub use error::{Error, Result};
pub use relation::{ColumnDescriptor, InformationSchema, QuotePolicy, Relation, RelationType};

// Re-export collaborator interfaces for hosts and tests
pub use client::{AwsGlueClient, AwsS3Client, GlueClient, ObjectListing, ObjectStore};
pub use metadata::{
    CatalogFilter, CatalogMacroArgs, Manifest, ManifestCatalogFilter, ManifestNode,
    RelationSource, SqlExecutor,
};
