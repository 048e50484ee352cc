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

//! Glue Data Catalog descriptions.
//!
//! These types mirror the JSON shapes of the Glue `GetTables`, `GetTable`,
//! `GetDatabases` and `GetPartitions` responses (PascalCase keys), reduced
//! to the fields the adapter reads. `AwsGlueClient` converts SDK output into
//! them; tests build them from JSON fixtures.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Glue table type of an Athena view.
pub const VIRTUAL_VIEW: &str = "VIRTUAL_VIEW";
/// Glue table type of an Athena table.
pub const EXTERNAL_TABLE: &str = "EXTERNAL_TABLE";

/// A column of a table's storage schema or partition keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlueColumn {
    pub name: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl GlueColumn {
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
            comment: None,
        }
    }
}

/// Physical storage of a table or partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageDescriptor {
    /// Storage schema; excludes partition keys.
    #[serde(default)]
    pub columns: Vec<GlueColumn>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub compressed: bool,
}

/// One entry of `GetTables` / the body of `GetTable`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlueTable {
    pub name: String,
    #[serde(default)]
    pub database_name: Option<String>,
    #[serde(default)]
    pub table_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub storage_descriptor: StorageDescriptor,
    #[serde(default)]
    pub partition_keys: Vec<GlueColumn>,
}

impl GlueTable {
    /// Storage-schema columns followed by partition keys, in that order.
    pub fn all_columns(&self) -> impl Iterator<Item = &GlueColumn> {
        self.storage_descriptor
            .columns
            .iter()
            .chain(self.partition_keys.iter())
    }

    pub fn location(&self) -> Option<&str> {
        self.storage_descriptor.location.as_deref()
    }
}

/// One entry of `GetPartitions`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GluePartition {
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub storage_descriptor: StorageDescriptor,
}

impl GluePartition {
    pub fn location(&self) -> Option<&str> {
        self.storage_descriptor.location.as_deref()
    }
}

/// One page of `GetTables`.
#[derive(Debug, Clone, Default)]
pub struct TablePage {
    pub tables: Vec<GlueTable>,
    pub next_token: Option<String>,
}

/// One page of `GetDatabases`; only database names are kept.
#[derive(Debug, Clone, Default)]
pub struct DatabasePage {
    pub names: Vec<String>,
    pub next_token: Option<String>,
}

/// One page of `GetPartitions`.
#[derive(Debug, Clone, Default)]
pub struct PartitionPage {
    pub partitions: Vec<GluePartition>,
    pub next_token: Option<String>,
}
