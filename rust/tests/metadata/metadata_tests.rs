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

//! Live tests of the Glue-backed metadata operations.
//!
//! These tests run against a real AWS account and verify relation listing,
//! catalog assembly and table cleanup through Glue and S3.
//!
//! ## Setup Requirements
//!
//! These tests require the following environment variables to be set:
//! - `ATHENA_S3_STAGING_DIR`: Query result location (e.g., "s3://my-bucket/athena/")
//! - `ATHENA_TEST_SCHEMA`: A Glue database with at least one table or view
//!
//! Optionally:
//! - `ATHENA_TEST_CATALOG`: The data catalog (default: "awsdatacatalog")
//! - `AWS_REGION` / `AWS_PROFILE`: Passed to the AWS configuration
//!
//! ## Running Tests
//!
//! These tests are marked with `#[ignore]` to prevent them from running in CI
//! without proper credentials. To run them locally:
//!
//! ```bash
//! export ATHENA_S3_STAGING_DIR="s3://my-bucket/athena/"
//! export ATHENA_TEST_SCHEMA="analytics"
//! export AWS_REGION="eu-west-1"
//!
//! cargo test --test metadata_tests -- --ignored --nocapture
//! ```

use arrow_array::{Array, RecordBatch, StringArray};
use athena_adapter::{
    AthenaAdapter, AthenaCredentials, CatalogMacroArgs, ColumnDescriptor, ConnectionContext,
    Error, InformationSchema, Manifest, ManifestNode, Relation, Result, SqlExecutor,
};
use std::collections::BTreeSet;
use std::env;
use std::sync::Arc;

/// Helper struct for test configuration.
struct TestConfig {
    staging_dir: String,
    catalog: String,
    schema: String,
    region: Option<String>,
    profile: Option<String>,
}

impl TestConfig {
    /// Panics if required environment variables are not set.
    fn from_env() -> Self {
        Self {
            staging_dir: env::var("ATHENA_S3_STAGING_DIR").expect("ATHENA_S3_STAGING_DIR not set"),
            catalog: env::var("ATHENA_TEST_CATALOG")
                .unwrap_or_else(|_| "awsdatacatalog".to_string()),
            schema: env::var("ATHENA_TEST_SCHEMA").expect("ATHENA_TEST_SCHEMA not set"),
            region: env::var("AWS_REGION").ok(),
            profile: env::var("AWS_PROFILE").ok(),
        }
    }
}

/// These tests exercise Glue only; any SQL fallback is a failure.
#[derive(Debug)]
struct NoSql;

impl SqlExecutor for NoSql {
    fn execute_macro(
        &self,
        macro_name: &str,
        _args: &CatalogMacroArgs,
        _manifest: &Manifest,
    ) -> Result<RecordBatch> {
        Err(Error::Sql(format!("unexpected SQL fallback: {}", macro_name)))
    }

    fn list_relations_without_caching(&self, schema_relation: &Relation) -> Result<Vec<Relation>> {
        Err(Error::Sql(format!(
            "unexpected SQL fallback listing {}",
            schema_relation
        )))
    }

    fn get_columns_in_relation(&self, relation: &Relation) -> Result<Vec<ColumnDescriptor>> {
        Err(Error::Sql(format!("unexpected SQL describe of {}", relation)))
    }
}

fn connect(config: &TestConfig) -> ConnectionContext {
    let mut credentials = AthenaCredentials::new(&config.schema, &config.staging_dir);
    credentials.database = config.catalog.clone();
    credentials.region_name = config.region.clone();
    credentials.aws_profile_name = config.profile.clone();
    credentials.log_level = Some("debug".to_string());
    ConnectionContext::connect(credentials).expect("Failed to connect")
}

#[test]
#[ignore]
fn test_list_relations() {
    let config = TestConfig::from_env();
    let ctx = connect(&config);
    let adapter = AthenaAdapter::new(Arc::new(NoSql));

    let relations = adapter
        .list_relations_without_caching(
            &ctx,
            &Relation::schema_only(&config.catalog, &config.schema),
        )
        .expect("list_relations_without_caching should succeed");
    assert!(!relations.is_empty(), "Schema should have relations");

    println!("Found {} relations:", relations.len());
    for relation in &relations {
        assert!(relation.relation_type().is_some());
        println!(
            "  - {} ({:?}, {} columns)",
            relation,
            relation.relation_type(),
            relation.columns().len()
        );
    }
}

#[test]
#[ignore]
fn test_get_one_catalog() {
    let config = TestConfig::from_env();
    let ctx = connect(&config);
    let adapter = AthenaAdapter::new(Arc::new(NoSql));
    let manifest = Manifest::new(
        vec![ManifestNode::model(
            "model.live.any",
            &config.catalog,
            &config.schema,
            "any",
        )],
        vec![],
    );

    let batch = adapter
        .get_one_catalog(
            &ctx,
            &InformationSchema::new(&config.catalog),
            &BTreeSet::new(),
            &manifest,
        )
        .expect("get_one_catalog should succeed");
    assert!(batch.num_rows() > 0, "Catalog should have rows");

    let schemas = batch
        .column_by_name("table_schema")
        .expect("table_schema column")
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("table_schema should be StringArray");
    for i in 0..schemas.len() {
        assert_eq!(
            schemas.value(i).to_lowercase(),
            config.schema.to_lowercase()
        );
    }
    println!("Catalog has {} rows", batch.num_rows());
}

#[test]
#[ignore]
fn test_clean_up_missing_table() {
    let config = TestConfig::from_env();
    let ctx = connect(&config);
    let adapter = AthenaAdapter::new(Arc::new(NoSql));

    adapter
        .clean_up_table(&ctx, &config.schema, "athena_adapter_table_that_does_not_exist")
        .expect("cleanup of a missing table should be a no-op");
}

#[test]
#[ignore]
fn test_storage_location() {
    let config = TestConfig::from_env();
    let ctx = connect(&config);
    let adapter = AthenaAdapter::new(Arc::new(NoSql));

    let location = adapter
        .storage_table_location(&ctx, &config.schema, "t")
        .expect("default naming is schema_table");
    assert_eq!(
        location,
        format!("{}tables/{}/t/", config.staging_dir, config.schema)
    );
}
