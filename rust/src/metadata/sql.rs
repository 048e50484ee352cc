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

//! SQL execution collaborator.
//!
//! The host tool owns macro rendering and query execution. The adapter only
//! needs the SQL equivalents of its Glue-backed operations, which it reaches
//! through [`SqlExecutor`] when the catalog service is unavailable.

use crate::error::Result;
use crate::metadata::manifest::Manifest;
use crate::relation::{ColumnDescriptor, InformationSchema, Relation};
use arrow_array::RecordBatch;
use std::collections::BTreeSet;

/// Macro producing the catalog table of one information schema.
pub const GET_CATALOG_MACRO_NAME: &str = "get_catalog";

/// Keyword arguments of [`GET_CATALOG_MACRO_NAME`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMacroArgs {
    pub information_schema: InformationSchema,
    pub schemas: BTreeSet<String>,
}

/// SQL-based equivalents of the Glue-backed operations.
pub trait SqlExecutor: Send + Sync + std::fmt::Debug {
    /// Run `macro_name` with `args`; the full manifest is passed so project
    /// overrides of the macro apply.
    ///
    /// For [`GET_CATALOG_MACRO_NAME`] the returned table has the same logical
    /// columns as [`crate::metadata::catalog::catalog_column_names`].
    fn execute_macro(
        &self,
        macro_name: &str,
        args: &CatalogMacroArgs,
        manifest: &Manifest,
    ) -> Result<RecordBatch>;

    /// List the relations of a schema by querying the information schema.
    fn list_relations_without_caching(&self, schema_relation: &Relation) -> Result<Vec<Relation>>;

    /// Describe the columns of a relation with `DESCRIBE`-style SQL.
    fn get_columns_in_relation(&self, relation: &Relation) -> Result<Vec<ColumnDescriptor>>;
}
