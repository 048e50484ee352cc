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

//! Storage locations of managed tables.
//!
//! Locations are pure string computations over the connection credentials;
//! nothing here touches S3.

use crate::config::{AthenaCredentials, S3DataNaming};
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Root under which table data is written: `s3_data_dir` when set, else
/// `s3_staging_dir` + `tables/`.
pub fn storage_table_prefix(credentials: &AthenaCredentials) -> String {
    match credentials.s3_data_dir {
        Some(ref dir) => dir.clone(),
        None => format!("{}tables/", credentials.s3_staging_dir),
    }
}

/// `<prefix><schema>/<table>/`
pub fn schema_table_location(credentials: &AthenaCredentials, schema: &str, table: &str) -> String {
    format!("{}{}/{}/", storage_table_prefix(credentials), schema, table)
}

/// `<prefix><random uuid>/`, different on every call.
pub fn uuid_table_location(credentials: &AthenaCredentials) -> String {
    format!("{}{}/", storage_table_prefix(credentials), Uuid::new_v4())
}

/// Location of a new table according to the configured naming mode.
pub fn storage_table_location(
    credentials: &AthenaCredentials,
    schema: &str,
    table: &str,
) -> Result<String> {
    Ok(match credentials.data_naming()? {
        S3DataNaming::SchemaTable => schema_table_location(credentials, schema, table),
        S3DataNaming::Uuid => uuid_table_location(credentials),
    })
}

/// Whether the user set `s3_data_dir` explicitly.
pub fn has_explicit_data_dir(credentials: &AthenaCredentials) -> bool {
    credentials.s3_data_dir.is_some()
}

/// A bucket and key prefix taken from an `s3://` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub prefix: String,
}

static S3_LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^s3://([^/]+)/(.*)$").expect("valid"));

/// Split `s3://bucket/prefix`; `None` for anything else.
///
/// The prefix is used as is: a location without a trailing slash also
/// matches sibling keys sharing that prefix.
pub fn parse_s3_location(location: &str) -> Option<S3Location> {
    let caps = S3_LOCATION.captures(location)?;
    Some(S3Location {
        bucket: caps[1].to_string(),
        prefix: caps[2].to_string(),
    })
}
