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

//! Connection credentials and adapter options.
//!
//! Credentials come either from a deserialized profile (serde) or from
//! string options set one by one:
//!
//! | Option | Description |
//! |--------|-------------|
//! | `athena.database` | Data catalog name (default `awsdatacatalog`) |
//! | `athena.schema` | Default schema |
//! | `athena.s3_staging_dir` | Query result location, `s3://bucket/prefix/` |
//! | `athena.s3_data_dir` | Root for table data; overrides `<staging>/tables/` |
//! | `athena.s3_data_naming` | `schema_table` (default) or `uuid` |
//! | `athena.region_name` | AWS region |
//! | `athena.aws_profile_name` | Named AWS profile |
//! | `athena.work_group` | Athena work group |
//! | `athena.log_level` | Log level for [`crate::logging`] |
//! | `athena.log_file` | Log file for [`crate::logging`] |

use crate::error::{Error, Result};
use crate::logging::LogConfig;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Catalog name Athena uses for the caller's own Glue Data Catalog.
pub const DEFAULT_DATA_CATALOG: &str = "awsdatacatalog";

/// Policy for deriving the S3 location of a new table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum S3DataNaming {
    /// `<root><schema>/<table>/`
    SchemaTable,
    /// `<root><uuid>/`, a fresh UUID per call.
    Uuid,
}

impl FromStr for S3DataNaming {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "schema_table" => Ok(Self::SchemaTable),
            "uuid" => Ok(Self::Uuid),
            other => Err(Error::configuration(format!(
                "Unknown value for s3_data_naming: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for S3DataNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaTable => f.write_str("schema_table"),
            Self::Uuid => f.write_str("uuid"),
        }
    }
}

fn default_database() -> String {
    DEFAULT_DATA_CATALOG.to_string()
}

fn default_naming() -> String {
    S3DataNaming::SchemaTable.to_string()
}

/// Credentials of one Athena connection.
///
/// `s3_data_naming` stays as text: an unknown mode is only an error once a
/// table location is actually requested.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AthenaCredentials {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub s3_staging_dir: String,
    #[serde(default)]
    pub s3_data_dir: Option<String>,
    #[serde(default = "default_naming")]
    pub s3_data_naming: String,
    #[serde(default)]
    pub region_name: Option<String>,
    #[serde(default)]
    pub aws_profile_name: Option<String>,
    #[serde(default)]
    pub work_group: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for AthenaCredentials {
    fn default() -> Self {
        Self {
            database: default_database(),
            schema: String::new(),
            s3_staging_dir: String::new(),
            s3_data_dir: None,
            s3_data_naming: default_naming(),
            region_name: None,
            aws_profile_name: None,
            work_group: None,
            log_level: None,
            log_file: None,
        }
    }
}

impl AthenaCredentials {
    pub fn new(schema: impl Into<String>, s3_staging_dir: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            s3_staging_dir: s3_staging_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_s3_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.s3_data_dir = Some(dir.into());
        self
    }

    pub fn with_s3_data_naming(mut self, naming: impl Into<String>) -> Self {
        self.s3_data_naming = naming.into();
        self
    }

    /// Parsed naming mode; fails for anything but `schema_table` and `uuid`.
    pub fn data_naming(&self) -> Result<S3DataNaming> {
        self.s3_data_naming.parse()
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            file: self.log_file.clone(),
        }
    }

    /// Set a single `athena.*` option.
    pub fn set_option(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        match key {
            "athena.database" => self.database = value,
            "athena.schema" => self.schema = value,
            "athena.s3_staging_dir" => self.s3_staging_dir = value,
            "athena.s3_data_dir" => self.s3_data_dir = Self::non_empty(value),
            "athena.s3_data_naming" => self.s3_data_naming = value,
            "athena.region_name" => self.region_name = Self::non_empty(value),
            "athena.aws_profile_name" => self.aws_profile_name = Self::non_empty(value),
            "athena.work_group" => self.work_group = Self::non_empty(value),
            "athena.log_level" => self.log_level = Self::non_empty(value),
            "athena.log_file" => self.log_file = Self::non_empty(value),
            other => {
                return Err(Error::invalid_argument(format!(
                    "Unknown option: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    fn non_empty(value: String) -> Option<String> {
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
