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

//! Metadata services behind the adapter's catalog-facing operations.
//!
//! Glue is the primary source. Each operation that reads Glue has a SQL
//! equivalent reached through [`SqlExecutor`] when Glue access fails.
//!
//! ## Module Structure
//!
//! - `tables`: paginated `GetTables` / `GetDatabases` retrieval
//! - `translate`: Glue table descriptions to relations
//! - `catalog`: catalog table assembly and post-filtering
//! - `manifest`: build-graph schemas and the schema search map
//! - `fallback`: Glue-first, SQL-second execution
//! - `sql`: the SQL collaborator interface

pub mod catalog;
pub mod fallback;
pub mod manifest;
pub mod sql;
pub mod tables;
pub mod translate;

pub use catalog::{CatalogAssembler, CatalogFilter, CatalogRow, ManifestCatalogFilter};
pub use manifest::{Manifest, ManifestNode, SchemaSearchMap};
pub use sql::{CatalogMacroArgs, SqlExecutor, GET_CATALOG_MACRO_NAME};
pub use tables::{list_glue_databases, GlueTables};
pub use translate::{GlueRelationSource, RelationSource, SqlRelationSource};
