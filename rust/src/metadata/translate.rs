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

//! Translation of Glue table descriptions into [`Relation`]s.
//!
//! Relation listing is a capability with two implementations:
//! - [`SqlRelationSource`]: the information-schema query of the SQL adapter;
//! - [`GlueRelationSource`]: Glue `GetTables`, falling back to SQL when the
//!   catalog service cannot be reached.

use crate::connection::ConnectionContext;
use crate::error::{Error, Result};
use crate::metadata::fallback::with_fallback;
use crate::metadata::sql::SqlExecutor;
use crate::metadata::tables::GlueTables;
use crate::relation::{ColumnDescriptor, QuotePolicy, Relation, RelationType};
use crate::types::glue::{GlueTable, EXTERNAL_TABLE, VIRTUAL_VIEW};
use std::sync::Arc;

/// Classify a Glue table. Unknown kinds are a contract mismatch, not a
/// transient failure.
pub fn relation_type_from_glue(table: &GlueTable) -> Result<RelationType> {
    match table.table_type.as_deref() {
        Some(VIRTUAL_VIEW) => Ok(RelationType::View),
        Some(EXTERNAL_TABLE) => Ok(RelationType::Table),
        other => Err(Error::UnknownRelationType {
            table_type: other.unwrap_or("None").to_string(),
            table_name: table.name.clone(),
        }),
    }
}

/// Storage columns followed by partition keys.
///
/// Names are neither sorted nor deduplicated: a partition key that repeats
/// a storage column name appears twice.
pub fn column_information(table: &GlueTable) -> Vec<ColumnDescriptor> {
    table
        .all_columns()
        .enumerate()
        .map(|(idx, column)| ColumnDescriptor {
            name: column.name.clone(),
            data_type: column.r#type.clone(),
            ordinal: Some(idx),
            comment: column.comment.clone(),
        })
        .collect()
}

/// Build the relation for one table of `database`.`schema`.
pub fn translate_table(database: &str, schema: &str, table: &GlueTable) -> Result<Relation> {
    let relation_type = relation_type_from_glue(table)?;
    Ok(Relation::create(database, schema, &table.name)
        .with_type(relation_type)
        .with_quote_policy(QuotePolicy::ALL)
        .with_columns(column_information(table)))
}

/// Lists the relations of a schema without consulting the relation cache.
pub trait RelationSource: Send + Sync + std::fmt::Debug {
    fn list_relations(
        &self,
        ctx: &ConnectionContext,
        schema_relation: &Relation,
    ) -> Result<Vec<Relation>>;
}

/// Relation listing through the SQL collaborator.
#[derive(Debug, Clone)]
pub struct SqlRelationSource {
    sql: Arc<dyn SqlExecutor>,
}

impl SqlRelationSource {
    pub fn new(sql: Arc<dyn SqlExecutor>) -> Self {
        Self { sql }
    }
}

impl RelationSource for SqlRelationSource {
    fn list_relations(
        &self,
        _ctx: &ConnectionContext,
        schema_relation: &Relation,
    ) -> Result<Vec<Relation>> {
        self.sql.list_relations_without_caching(schema_relation)
    }
}

/// Relation listing through Glue, all-or-nothing fallback to SQL.
#[derive(Debug, Clone)]
pub struct GlueRelationSource {
    fallback: SqlRelationSource,
}

impl GlueRelationSource {
    pub fn new(sql: Arc<dyn SqlExecutor>) -> Self {
        Self {
            fallback: SqlRelationSource::new(sql),
        }
    }

    fn list_from_glue(
        &self,
        ctx: &ConnectionContext,
        schema_relation: &Relation,
    ) -> Result<Vec<Relation>> {
        let database = schema_relation.database();
        let schema = schema_relation.schema();
        let tables = GlueTables::new(ctx, database, schema)?;
        tables
            .iter()
            .map(|table| translate_table(database, schema, &table?))
            .collect()
    }
}

impl RelationSource for GlueRelationSource {
    fn list_relations(
        &self,
        ctx: &ConnectionContext,
        schema_relation: &Relation,
    ) -> Result<Vec<Relation>> {
        with_fallback(
            "retrieving relations",
            || self.list_from_glue(ctx, schema_relation),
            || self.fallback.list_relations(ctx, schema_relation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AthenaCredentials;
    use crate::testing::{
        create_test_runtime, glue_table, test_context, MockGlueClient, MockObjectStore,
        MockSqlExecutor,
    };
    use crate::types::glue::GlueColumn;

    #[test]
    fn test_relation_type_mapping() {
        let view = glue_table("v", "VIRTUAL_VIEW", &[], &[]);
        let table = glue_table("t", "EXTERNAL_TABLE", &[], &[]);
        assert_eq!(relation_type_from_glue(&view).unwrap(), RelationType::View);
        assert_eq!(relation_type_from_glue(&table).unwrap(), RelationType::Table);

        let managed = glue_table("m", "MANAGED_TABLE", &[], &[]);
        match relation_type_from_glue(&managed).unwrap_err() {
            Error::UnknownRelationType {
                table_type,
                table_name,
            } => {
                assert_eq!(table_type, "MANAGED_TABLE");
                assert_eq!(table_name, "m");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut untyped = glue_table("u", "EXTERNAL_TABLE", &[], &[]);
        untyped.table_type = None;
        assert!(relation_type_from_glue(&untyped).is_err());
    }

    #[test]
    fn test_partition_keys_follow_storage_columns() {
        let table = glue_table("t", "EXTERNAL_TABLE", &["a", "b"], &["p"]);
        let relation = translate_table("awsdatacatalog", "s", &table).unwrap();

        let names: Vec<&str> = relation.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "p"]);
        assert_eq!(relation.columns()[2].ordinal, Some(2));
        assert_eq!(relation.columns()[2].data_type, "date");
        assert_eq!(relation.quote_policy(), QuotePolicy::ALL);
        assert_eq!(relation.identifier(), Some("t"));
    }

    #[test]
    fn test_duplicate_partition_name_is_kept() {
        let mut table = glue_table("t", "EXTERNAL_TABLE", &["dt", "v"], &[]);
        table.partition_keys.push(GlueColumn::new("dt", "date"));
        let names: Vec<String> = column_information(&table)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["dt", "v", "dt"]);
    }

    #[test]
    fn test_glue_source_lists_relations() {
        let runtime = create_test_runtime();
        let glue = Arc::new(MockGlueClient::new().with_table_pages(
            "analytics",
            vec![vec![
                glue_table("events", "EXTERNAL_TABLE", &["id"], &["dt"]),
                glue_table("daily", "VIRTUAL_VIEW", &["n"], &[]),
            ]],
        ));
        let sql = Arc::new(MockSqlExecutor::new());
        let ctx = test_context(
            AthenaCredentials::default(),
            glue,
            Arc::new(MockObjectStore::new()),
            &runtime,
        );

        let source = GlueRelationSource::new(sql.clone());
        let relations = source
            .list_relations(&ctx, &Relation::schema_only("awsdatacatalog", "analytics"))
            .unwrap();

        assert_eq!(relations.len(), 2);
        assert_eq!(relations[0].relation_type(), Some(RelationType::Table));
        assert_eq!(relations[0].columns().len(), 2);
        assert_eq!(relations[1].relation_type(), Some(RelationType::View));
        assert!(sql.listing_calls().is_empty());
    }

    #[test]
    fn test_glue_source_falls_back_to_sql() {
        let runtime = create_test_runtime();
        let glue = Arc::new(
            MockGlueClient::new().failing_tables("analytics", "AccessDeniedException"),
        );
        let from_sql = Relation::create("awsdatacatalog", "analytics", "events")
            .with_type(RelationType::Table);
        let sql = Arc::new(MockSqlExecutor::new().with_relations(vec![from_sql.clone()]));
        let ctx = test_context(
            AthenaCredentials::default(),
            glue,
            Arc::new(MockObjectStore::new()),
            &runtime,
        );

        let source = GlueRelationSource::new(sql.clone());
        let relations = source
            .list_relations(&ctx, &Relation::schema_only("awsdatacatalog", "analytics"))
            .unwrap();

        assert_eq!(relations, vec![from_sql]);
        assert_eq!(
            sql.listing_calls(),
            vec!["\"awsdatacatalog\".\"analytics\""]
        );
    }

    #[test]
    fn test_unknown_type_is_not_recovered() {
        let runtime = create_test_runtime();
        let glue = Arc::new(MockGlueClient::new().with_table_pages(
            "analytics",
            vec![vec![glue_table("m", "MANAGED_TABLE", &[], &[])]],
        ));
        let sql = Arc::new(MockSqlExecutor::new());
        let ctx = test_context(
            AthenaCredentials::default(),
            glue,
            Arc::new(MockObjectStore::new()),
            &runtime,
        );

        let source = GlueRelationSource::new(sql.clone());
        let err = source
            .list_relations(&ctx, &Relation::schema_only("awsdatacatalog", "analytics"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownRelationType { .. }));
        assert!(sql.listing_calls().is_empty());
    }
}
