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

//! Catalog table assembly for documentation generation.
//!
//! The catalog of an information schema is one row per column of every table
//! in the schemas the build graph uses. Each row repeats the table-level
//! fields and eight table statistics, followed by the column fields:
//!
//! ```text
//! table_database | table_schema | table_name | table_type
//! stats:<name>:label | stats:<name>:value | stats:<name>:description | stats:<name>:include
//!   (for description, owner, created_at, updated_at, created_by,
//!    partitions, location, compressed)
//! column_name | column_type | column_index | column_comment
//! ```
//!
//! Rows come from Glue. If any Glue request of the assembly fails with a
//! catalog access error, the rows gathered so far are dropped and the whole
//! catalog is produced by the `get_catalog` SQL macro instead.

use crate::connection::ConnectionContext;
use crate::error::{Error, Result};
use crate::metadata::fallback::with_fallback;
use crate::metadata::manifest::Manifest;
use crate::metadata::sql::{CatalogMacroArgs, SqlExecutor, GET_CATALOG_MACRO_NAME};
use crate::metadata::tables::{list_glue_databases, GlueTables};
use crate::metadata::translate::relation_type_from_glue;
use crate::relation::InformationSchema;
use crate::types::glue::GlueTable;
use arrow_array::{Array, ArrayRef, BooleanArray, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use arrow_select::filter::filter_record_batch;
use chrono::{DateTime, Timelike, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Table statistics in catalog order: (name, description).
pub const CATALOG_STATS: [(&str, &str); 8] = [
    ("description", "Table description"),
    ("owner", "Table owner"),
    ("created_at", "Table creation time"),
    ("updated_at", "Table update time"),
    ("created_by", "Who create it"),
    ("partitions", "Partition keys"),
    ("location", "Table path"),
    ("compressed", "Table has compressed or not"),
];

const TABLE_COLUMNS: [&str; 4] = ["table_database", "table_schema", "table_name", "table_type"];
const COLUMN_COLUMNS: [&str; 4] = ["column_name", "column_type", "column_index", "column_comment"];
const STATS_PARTS: [&str; 4] = ["label", "value", "description", "include"];

/// Column names of the catalog table, in order.
pub fn catalog_column_names() -> Vec<String> {
    let mut names: Vec<String> = TABLE_COLUMNS.iter().map(|s| s.to_string()).collect();
    for (stat, _) in CATALOG_STATS {
        for part in STATS_PARTS {
            names.push(format!("stats:{}:{}", stat, part));
        }
    }
    names.extend(COLUMN_COLUMNS.iter().map(|s| s.to_string()));
    names
}

/// Arrow schema of the catalog table.
pub fn catalog_schema() -> Schema {
    let mut fields: Vec<Field> = TABLE_COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, false))
        .collect();
    for (stat, _) in CATALOG_STATS {
        for part in STATS_PARTS {
            let data_type = if part == "include" {
                DataType::Boolean
            } else {
                DataType::Utf8
            };
            fields.push(Field::new(format!("stats:{}:{}", stat, part), data_type, false));
        }
    }
    fields.push(Field::new("column_name", DataType::Utf8, false));
    fields.push(Field::new("column_type", DataType::Utf8, false));
    fields.push(Field::new("column_index", DataType::Int64, false));
    fields.push(Field::new("column_comment", DataType::Utf8, false));
    Schema::new(fields)
}

/// One table statistic. `include` is always true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsEntry {
    pub label: String,
    pub value: String,
    pub description: String,
    pub include: bool,
}

impl StatsEntry {
    fn new(label: &str, value: String, description: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            description: description.to_string(),
            include: true,
        }
    }
}

/// One row of the catalog table: a column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub table_database: String,
    pub table_schema: String,
    pub table_name: String,
    pub table_type: String,
    /// In [`CATALOG_STATS`] order.
    pub stats: [StatsEntry; CATALOG_STATS.len()],
    pub column_name: String,
    pub column_type: String,
    pub column_index: i64,
    pub column_comment: String,
}

fn format_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) if ts.nanosecond() == 0 => ts.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S%.6f%:z").to_string(),
        None => String::new(),
    }
}

fn table_stats(table: &GlueTable) -> [StatsEntry; CATALOG_STATS.len()] {
    let partitions: Vec<&str> = table.partition_keys.iter().map(|c| c.name.as_str()).collect();
    let mut values = [
        table.description.clone().unwrap_or_default(),
        table.owner.clone().unwrap_or_default(),
        format_timestamp(table.create_time.as_ref()),
        format_timestamp(table.update_time.as_ref()),
        table.created_by.clone().unwrap_or_default(),
        partitions.join(", "),
        table.location().unwrap_or_default().to_string(),
        table.storage_descriptor.compressed.to_string(),
    ];
    std::array::from_fn(|i| {
        let (label, description) = CATALOG_STATS[i];
        StatsEntry::new(label, std::mem::take(&mut values[i]), description)
    })
}

/// Flatten a table into one row per column, storage columns first.
///
/// The table is classified first, so an unknown table type fails even for a
/// table without columns.
pub fn flatten_table(database: &str, schema: &str, table: &GlueTable) -> Result<Vec<CatalogRow>> {
    let table_type = relation_type_from_glue(table)?;
    let stats = table_stats(table);
    Ok(table
        .all_columns()
        .enumerate()
        .map(|(idx, column)| CatalogRow {
            table_database: database.to_string(),
            table_schema: schema.to_string(),
            table_name: table.name.clone(),
            table_type: table_type.as_str().to_string(),
            stats: stats.clone(),
            column_name: column.name.clone(),
            column_type: column.r#type.clone(),
            column_index: idx as i64,
            column_comment: column.comment.clone().unwrap_or_default(),
        })
        .collect())
}

fn string_column<'a>(rows: &'a [CatalogRow], f: impl Fn(&'a CatalogRow) -> &'a str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(rows.iter().map(f)))
}

/// Build the catalog table from rows. No rows gives a table with no columns.
pub fn rows_to_record_batch(rows: &[CatalogRow]) -> Result<RecordBatch> {
    if rows.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(Schema::empty())));
    }

    let mut columns: Vec<ArrayRef> = vec![
        string_column(rows, |r| r.table_database.as_str()),
        string_column(rows, |r| r.table_schema.as_str()),
        string_column(rows, |r| r.table_name.as_str()),
        string_column(rows, |r| r.table_type.as_str()),
    ];
    for i in 0..CATALOG_STATS.len() {
        columns.push(string_column(rows, |r| r.stats[i].label.as_str()));
        columns.push(string_column(rows, |r| r.stats[i].value.as_str()));
        columns.push(string_column(rows, |r| r.stats[i].description.as_str()));
        columns.push(Arc::new(BooleanArray::from(
            rows.iter().map(|r| r.stats[i].include).collect::<Vec<_>>(),
        )));
    }
    columns.push(string_column(rows, |r| r.column_name.as_str()));
    columns.push(string_column(rows, |r| r.column_type.as_str()));
    columns.push(Arc::new(Int64Array::from_iter_values(
        rows.iter().map(|r| r.column_index),
    )));
    columns.push(string_column(rows, |r| r.column_comment.as_str()));

    Ok(RecordBatch::try_new(Arc::new(catalog_schema()), columns)?)
}

/// Post-filter applied to every non-empty catalog table.
pub trait CatalogFilter: Send + Sync + std::fmt::Debug {
    fn filter(&self, table: RecordBatch, manifest: &Manifest) -> Result<RecordBatch>;
}

/// Keeps rows whose lower-cased (`table_database`, `table_schema`) pair is
/// used by the manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestCatalogFilter;

fn text_column<'a>(table: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    table
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| Error::Sql(format!("Catalog table has no text column {}", name)))
}

impl CatalogFilter for ManifestCatalogFilter {
    fn filter(&self, table: RecordBatch, manifest: &Manifest) -> Result<RecordBatch> {
        if table.num_columns() == 0 {
            return Ok(table);
        }
        let used = manifest.used_schema_pairs();
        let databases = text_column(&table, "table_database")?;
        let schemas = text_column(&table, "table_schema")?;

        let keep: BooleanArray = (0..table.num_rows())
            .map(|i| {
                let matched = databases.is_valid(i)
                    && schemas.is_valid(i)
                    && used.contains(&(
                        databases.value(i).to_lowercase(),
                        schemas.value(i).to_lowercase(),
                    ));
                Some(matched)
            })
            .collect();
        Ok(filter_record_batch(&table, &keep)?)
    }
}

/// Builds the catalog table of one information schema.
#[derive(Debug)]
pub struct CatalogAssembler<'a> {
    ctx: &'a ConnectionContext,
    sql: &'a dyn SqlExecutor,
    filter: &'a dyn CatalogFilter,
}

impl<'a> CatalogAssembler<'a> {
    pub fn new(
        ctx: &'a ConnectionContext,
        sql: &'a dyn SqlExecutor,
        filter: &'a dyn CatalogFilter,
    ) -> Self {
        Self { ctx, sql, filter }
    }

    /// Glue rows of every used schema visible in the target catalog.
    fn glue_rows(
        &self,
        information_schema: &InformationSchema,
        manifest: &Manifest,
    ) -> Result<Vec<CatalogRow>> {
        let database = information_schema.database.as_str();
        let used = manifest.used_schema_names();
        let targets: Vec<String> = list_glue_databases(self.ctx, database)?
            .into_iter()
            .filter(|name| used.contains(&name.to_lowercase()))
            .collect();
        debug!(
            "Catalog of {}: {} used schemas found in Glue",
            information_schema,
            targets.len()
        );

        let mut rows = Vec::new();
        for schema in &targets {
            let tables = GlueTables::new(self.ctx, database, schema)?;
            for table in &tables {
                rows.extend(flatten_table(database, schema, &table?)?);
            }
        }
        Ok(rows)
    }

    fn glue_catalog(
        &self,
        information_schema: &InformationSchema,
        manifest: &Manifest,
    ) -> Result<RecordBatch> {
        let rows = self.glue_rows(information_schema, manifest)?;
        if rows.is_empty() {
            return rows_to_record_batch(&rows);
        }
        let table = rows_to_record_batch(&rows)?;
        self.filter.filter(table, manifest)
    }

    fn sql_catalog(
        &self,
        information_schema: &InformationSchema,
        schemas: &BTreeSet<String>,
        manifest: &Manifest,
    ) -> Result<RecordBatch> {
        let args = CatalogMacroArgs {
            information_schema: information_schema.clone(),
            schemas: schemas.clone(),
        };
        let table = self
            .sql
            .execute_macro(GET_CATALOG_MACRO_NAME, &args, manifest)?;
        self.filter.filter(table, manifest)
    }

    /// Catalog table of `information_schema`.
    ///
    /// `schemas` is only forwarded to the SQL macro; the Glue path scopes the
    /// result by the schemas the manifest uses.
    pub fn get_one_catalog(
        &self,
        information_schema: &InformationSchema,
        schemas: &BTreeSet<String>,
        manifest: &Manifest,
    ) -> Result<RecordBatch> {
        with_fallback(
            "retrieving catalog",
            || self.glue_catalog(information_schema, manifest),
            || self.sql_catalog(information_schema, schemas, manifest),
        )
    }
}
