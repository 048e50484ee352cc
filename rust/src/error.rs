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

//! Error types for the Athena adapter.
//!
//! Errors fall into two groups:
//! - recoverable: [`Error::CatalogAccess`], which callers with a SQL
//!   equivalent turn into a fallback;
//! - fatal: everything else, surfaced to the caller unchanged.

use arrow_schema::ArrowError;
use thiserror::Error;

/// Glue error code reported when a database, table or partition is missing.
pub const ENTITY_NOT_FOUND: &str = "EntityNotFoundException";

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required identifier was missing before any remote call was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A Glue call failed (authorization, throttling, missing entity, ...).
    #[error("catalog access failed: code={code}, message={message}")]
    CatalogAccess { code: String, message: String },

    /// Glue returned a table kind the adapter cannot classify.
    #[error("Unknown table type {table_type} for {table_name}")]
    UnknownRelationType {
        table_type: String,
        table_name: String,
    },

    /// Adapter configuration cannot be honoured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An S3 call failed during cleanup.
    #[error("object storage call failed: code={code}, message={message}")]
    ObjectStore { code: String, message: String },

    /// The SQL execution collaborator reported a failure.
    #[error("SQL execution failed: {0}")]
    Sql(String),

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn catalog_access(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CatalogAccess {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn object_store(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ObjectStore {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error is a Glue access failure that a SQL path can replace.
    pub fn is_catalog_access(&self) -> bool {
        matches!(self, Self::CatalogAccess { .. })
    }

    /// Whether Glue reported the requested entity as missing.
    pub fn is_entity_not_found(&self) -> bool {
        matches!(self, Self::CatalogAccess { code, .. } if code == ENTITY_NOT_FOUND)
    }
}
