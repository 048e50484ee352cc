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

//! In-memory collaborators for unit tests: Glue, S3 and SQL execution.

use crate::client::{GlueClient, ObjectListing, ObjectStore};
use crate::config::AthenaCredentials;
use crate::connection::ConnectionContext;
use crate::error::{Error, Result, ENTITY_NOT_FOUND};
use crate::metadata::manifest::Manifest;
use crate::metadata::sql::{CatalogMacroArgs, SqlExecutor};
use crate::relation::{ColumnDescriptor, Relation};
use crate::types::glue::{
    DatabasePage, GlueColumn, GluePartition, GlueTable, PartitionPage, StorageDescriptor,
    TablePage,
};
use arrow_array::RecordBatch;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

pub(crate) fn create_test_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

pub(crate) fn glue_table(
    name: &str,
    table_type: &str,
    columns: &[&str],
    partitions: &[&str],
) -> GlueTable {
    GlueTable {
        name: name.to_string(),
        database_name: None,
        table_type: Some(table_type.to_string()),
        description: None,
        owner: None,
        create_time: None,
        update_time: None,
        created_by: None,
        storage_descriptor: StorageDescriptor {
            columns: columns.iter().map(|c| GlueColumn::new(*c, "string")).collect(),
            location: Some(format!("s3://bucket/{}/", name)),
            compressed: false,
        },
        partition_keys: partitions.iter().map(|c| GlueColumn::new(*c, "date")).collect(),
    }
}

/// Glue mock serving pre-split pages and recording every call.
#[derive(Debug, Default)]
pub(crate) struct MockGlueClient {
    table_pages: HashMap<String, Vec<Vec<GlueTable>>>,
    database_pages: Vec<Vec<String>>,
    tables: HashMap<(String, String), GlueTable>,
    partition_pages: Vec<Vec<GluePartition>>,
    /// Databases whose `GetTables` fails with the given code.
    failing: HashMap<String, String>,
    fail_databases: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockGlueClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_pages(mut self, database: &str, pages: Vec<Vec<GlueTable>>) -> Self {
        self.table_pages.insert(database.to_string(), pages);
        self
    }

    pub fn with_databases(mut self, pages: Vec<Vec<&str>>) -> Self {
        self.database_pages = pages
            .into_iter()
            .map(|page| page.into_iter().map(str::to_string).collect())
            .collect();
        self
    }

    pub fn with_table(mut self, database: &str, table: GlueTable) -> Self {
        self.tables
            .insert((database.to_string(), table.name.clone()), table);
        self
    }

    pub fn with_partition_pages(mut self, pages: Vec<Vec<GluePartition>>) -> Self {
        self.partition_pages = pages;
        self
    }

    pub fn failing_tables(mut self, database: &str, code: &str) -> Self {
        self.failing.insert(database.to_string(), code.to_string());
        self
    }

    pub fn failing_databases(mut self, code: &str) -> Self {
        self.fail_databases = Some(code.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn page_index(next_token: Option<&str>) -> usize {
        next_token.map(|t| t.parse().unwrap()).unwrap_or(0)
    }

    fn next_token(index: usize, total: usize) -> Option<String> {
        if index + 1 < total {
            Some((index + 1).to_string())
        } else {
            None
        }
    }
}

#[async_trait]
impl GlueClient for MockGlueClient {
    async fn get_tables(
        &self,
        catalog_id: Option<&str>,
        database: &str,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<TablePage> {
        self.record(format!(
            "GetTables catalog={:?} database={} max={} token={:?}",
            catalog_id, database, max_results, next_token
        ));
        if let Some(code) = self.failing.get(database) {
            return Err(Error::catalog_access(code.clone(), "mock failure"));
        }
        let pages = self.table_pages.get(database).cloned().unwrap_or_default();
        let index = Self::page_index(next_token);
        Ok(TablePage {
            tables: pages.get(index).cloned().unwrap_or_default(),
            next_token: Self::next_token(index, pages.len()),
        })
    }

    async fn get_databases(
        &self,
        catalog_id: Option<&str>,
        max_results: i32,
        next_token: Option<&str>,
    ) -> Result<DatabasePage> {
        self.record(format!(
            "GetDatabases catalog={:?} max={} token={:?}",
            catalog_id, max_results, next_token
        ));
        if let Some(ref code) = self.fail_databases {
            return Err(Error::catalog_access(code.clone(), "mock failure"));
        }
        let index = Self::page_index(next_token);
        Ok(DatabasePage {
            names: self.database_pages.get(index).cloned().unwrap_or_default(),
            next_token: Self::next_token(index, self.database_pages.len()),
        })
    }

    async fn get_table(&self, database: &str, name: &str) -> Result<GlueTable> {
        self.record(format!("GetTable database={} name={}", database, name));
        self.tables
            .get(&(database.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                Error::catalog_access(ENTITY_NOT_FOUND, format!("Table {} not found.", name))
            })
    }

    async fn get_partitions(
        &self,
        database: &str,
        table: &str,
        expression: &str,
        next_token: Option<&str>,
    ) -> Result<PartitionPage> {
        self.record(format!(
            "GetPartitions database={} table={} expression={} token={:?}",
            database, table, expression, next_token
        ));
        let index = Self::page_index(next_token);
        Ok(PartitionPage {
            partitions: self.partition_pages.get(index).cloned().unwrap_or_default(),
            next_token: Self::next_token(index, self.partition_pages.len()),
        })
    }
}

/// S3 mock holding keys per bucket and recording listings and deletions.
#[derive(Debug)]
pub(crate) struct MockObjectStore {
    objects: Mutex<BTreeMap<String, Vec<String>>>,
    page_size: usize,
    pub list_calls: Mutex<Vec<(String, String)>>,
    pub delete_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size: 1000,
            list_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_objects(self, bucket: &str, keys: &[&str]) -> Self {
        self.objects.lock().unwrap().insert(
            bucket.to_string(),
            keys.iter().map(|k| k.to_string()).collect(),
        );
        self
    }

    pub fn remaining(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .get(bucket)
            .cloned()
            .unwrap_or_default()
    }

    pub fn delete_calls(&self) -> Vec<(String, Vec<String>)> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls.lock().unwrap().len() + self.delete_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectListing> {
        self.list_calls
            .lock()
            .unwrap()
            .push((bucket.to_string(), prefix.to_string()));
        let matching: Vec<String> = self
            .remaining(bucket)
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        let start: usize = continuation_token.map(|t| t.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(matching.len());
        Ok(ObjectListing {
            keys: matching[start..end].to_vec(),
            next_continuation_token: if end < matching.len() {
                Some(end.to_string())
            } else {
                None
            },
        })
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<()> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((bucket.to_string(), keys.to_vec()));
        if let Some(stored) = self.objects.lock().unwrap().get_mut(bucket) {
            stored.retain(|k| !keys.contains(k));
        }
        Ok(())
    }
}

pub(crate) fn test_context(
    credentials: AthenaCredentials,
    glue: Arc<MockGlueClient>,
    store: Arc<MockObjectStore>,
    runtime: &tokio::runtime::Runtime,
) -> ConnectionContext {
    ConnectionContext::new(credentials, glue, store, runtime.handle().clone())
}

/// SQL collaborator returning canned results and recording every call.
#[derive(Debug, Default)]
pub(crate) struct MockSqlExecutor {
    catalog: Option<RecordBatch>,
    relations: Vec<Relation>,
    columns: Vec<ColumnDescriptor>,
    pub macro_calls: Mutex<Vec<(String, CatalogMacroArgs)>>,
    pub listing_calls: Mutex<Vec<String>>,
    pub column_calls: Mutex<Vec<String>>,
}

impl MockSqlExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, batch: RecordBatch) -> Self {
        self.catalog = Some(batch);
        self
    }

    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    pub fn macro_calls(&self) -> Vec<(String, CatalogMacroArgs)> {
        self.macro_calls.lock().unwrap().clone()
    }

    pub fn listing_calls(&self) -> Vec<String> {
        self.listing_calls.lock().unwrap().clone()
    }
}

impl SqlExecutor for MockSqlExecutor {
    fn execute_macro(
        &self,
        macro_name: &str,
        args: &CatalogMacroArgs,
        _manifest: &Manifest,
    ) -> Result<RecordBatch> {
        self.macro_calls
            .lock()
            .unwrap()
            .push((macro_name.to_string(), args.clone()));
        self.catalog
            .clone()
            .ok_or_else(|| Error::Sql("no catalog configured".to_string()))
    }

    fn list_relations_without_caching(&self, schema_relation: &Relation) -> Result<Vec<Relation>> {
        self.listing_calls
            .lock()
            .unwrap()
            .push(schema_relation.to_string());
        Ok(self.relations.clone())
    }

    fn get_columns_in_relation(&self, relation: &Relation) -> Result<Vec<ColumnDescriptor>> {
        self.column_calls.lock().unwrap().push(relation.to_string());
        Ok(self.columns.clone())
    }
}
