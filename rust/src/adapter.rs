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

//! The adapter facade.
//!
//! [`AthenaAdapter`] holds the pluggable collaborators (SQL execution,
//! relation listing, catalog filtering) and exposes the operations the host
//! tool calls. Every operation takes the [`ConnectionContext`] of the unit
//! of work it runs in.
//!
//! ## Example
//!
//! ```ignore
//! let ctx = ConnectionContext::connect(credentials)?;
//! let adapter = AthenaAdapter::new(Arc::new(my_sql_executor));
//!
//! let location = adapter.storage_table_location(&ctx, "analytics", "events")?;
//! let relations = adapter.list_relations_without_caching(
//!     &ctx,
//!     &Relation::schema_only("awsdatacatalog", "analytics"),
//! )?;
//! ```

use crate::connection::ConnectionContext;
use crate::error::Result;
use crate::metadata::catalog::{CatalogAssembler, CatalogFilter, ManifestCatalogFilter};
use crate::metadata::manifest::{Manifest, SchemaSearchMap};
use crate::metadata::sql::SqlExecutor;
use crate::metadata::translate::{GlueRelationSource, RelationSource};
use crate::relation::{ColumnDescriptor, InformationSchema, Relation};
use crate::storage::{self, StorageCleaner};
use arrow_array::RecordBatch;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// SQL expression for the current timestamp.
pub const DATE_FUNCTION: &str = "now()";

#[derive(Debug, Clone)]
pub struct AthenaAdapter {
    sql: Arc<dyn SqlExecutor>,
    relations: Arc<dyn RelationSource>,
    filter: Arc<dyn CatalogFilter>,
}

impl AthenaAdapter {
    /// Adapter listing relations through Glue and filtering catalogs by the
    /// manifest.
    pub fn new(sql: Arc<dyn SqlExecutor>) -> Self {
        Self {
            relations: Arc::new(GlueRelationSource::new(sql.clone())),
            filter: Arc::new(ManifestCatalogFilter),
            sql,
        }
    }

    pub fn with_relation_source(mut self, relations: Arc<dyn RelationSource>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_catalog_filter(mut self, filter: Arc<dyn CatalogFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn date_function(&self) -> &'static str {
        DATE_FUNCTION
    }

    pub fn storage_table_prefix(&self, ctx: &ConnectionContext) -> String {
        storage::storage_table_prefix(ctx.credentials())
    }

    pub fn schema_table_location(
        &self,
        ctx: &ConnectionContext,
        schema: &str,
        table: &str,
    ) -> String {
        storage::schema_table_location(ctx.credentials(), schema, table)
    }

    pub fn uuid_table_location(&self, ctx: &ConnectionContext) -> String {
        storage::uuid_table_location(ctx.credentials())
    }

    /// Location for a new table, per the configured `s3_data_naming`.
    pub fn storage_table_location(
        &self,
        ctx: &ConnectionContext,
        schema: &str,
        table: &str,
    ) -> Result<String> {
        storage::storage_table_location(ctx.credentials(), schema, table)
    }

    pub fn has_explicit_data_dir(&self, ctx: &ConnectionContext) -> bool {
        storage::has_explicit_data_dir(ctx.credentials())
    }

    pub fn clean_up_partitions(
        &self,
        ctx: &ConnectionContext,
        database: &str,
        table: &str,
        where_condition: &str,
    ) -> Result<()> {
        StorageCleaner::new(ctx).clean_up_partitions(database, table, where_condition)
    }

    pub fn clean_up_table(
        &self,
        ctx: &ConnectionContext,
        database: &str,
        table: &str,
    ) -> Result<()> {
        StorageCleaner::new(ctx).clean_up_table(database, table)
    }

    pub fn list_relations_without_caching(
        &self,
        ctx: &ConnectionContext,
        schema_relation: &Relation,
    ) -> Result<Vec<Relation>> {
        self.relations.list_relations(ctx, schema_relation)
    }

    /// Columns of a relation: the catalog's column information when the
    /// relation carries it, otherwise a SQL lookup.
    pub fn get_columns_in_relation(
        &self,
        relation: &Relation,
    ) -> Result<Vec<ColumnDescriptor>> {
        if !relation.columns().is_empty() {
            return Ok(relation.columns().to_vec());
        }
        self.sql.get_columns_in_relation(relation)
    }

    pub fn get_catalog_schemas(&self, manifest: &Manifest) -> SchemaSearchMap {
        manifest.get_catalog_schemas()
    }

    pub fn get_one_catalog(
        &self,
        ctx: &ConnectionContext,
        information_schema: &InformationSchema,
        schemas: &BTreeSet<String>,
        manifest: &Manifest,
    ) -> Result<RecordBatch> {
        CatalogAssembler::new(ctx, self.sql.as_ref(), self.filter.as_ref()).get_one_catalog(
            information_schema,
            schemas,
            manifest,
        )
    }

    /// One catalog table per information schema of the manifest's search
    /// map, in information-schema order.
    pub fn get_catalog(
        &self,
        ctx: &ConnectionContext,
        manifest: &Manifest,
    ) -> Result<Vec<RecordBatch>> {
        let search_map = self.get_catalog_schemas(manifest);
        let mut tables = Vec::new();
        for information_schema in search_map.information_schemas() {
            let schemas = search_map.schemas_for(&information_schema);
            debug!(
                "Building catalog of {} for {} schemas",
                information_schema,
                schemas.len()
            );
            tables.push(self.get_one_catalog(ctx, &information_schema, &schemas, manifest)?);
        }
        Ok(tables)
    }
}
