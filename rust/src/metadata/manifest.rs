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

//! Build-graph manifest and the schema sets derived from it.
//!
//! The manifest lists the nodes (models, seeds, snapshots, ...) and sources
//! of the current build. Two views are derived from it:
//! - the used schema set, a lower-cased filter for catalog rows;
//! - the [`SchemaSearchMap`], which scopes catalog fetches per information
//!   schema.

use crate::relation::{InformationSchema, QuotePolicy, Relation};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A node or source of the build graph, reduced to what catalog building reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestNode {
    pub unique_id: String,
    pub database: String,
    pub schema: String,
    /// Relation name (alias or identifier).
    pub identifier: String,
    /// Whether the node materializes as a relation at all.
    pub is_relational: bool,
    pub is_ephemeral_model: bool,
}

impl ManifestNode {
    /// A relational, non-ephemeral node such as a table or view model.
    pub fn model(
        unique_id: impl Into<String>,
        database: impl Into<String>,
        schema: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            database: database.into(),
            schema: schema.into(),
            identifier: identifier.into(),
            is_relational: true,
            is_ephemeral_model: false,
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.is_ephemeral_model = true;
        self
    }

    pub fn non_relational(mut self) -> Self {
        self.is_relational = false;
        self
    }

    pub fn to_relation(&self) -> Relation {
        Relation::create(&self.database, &self.schema, &self.identifier)
            .with_quote_policy(QuotePolicy::ALL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub nodes: Vec<ManifestNode>,
    pub sources: Vec<ManifestNode>,
}

impl Manifest {
    pub fn new(nodes: Vec<ManifestNode>, sources: Vec<ManifestNode>) -> Self {
        Self { nodes, sources }
    }

    /// (database, schema) pairs referenced by any node or source.
    pub fn get_used_schemas(&self) -> BTreeSet<(String, String)> {
        self.nodes
            .iter()
            .chain(self.sources.iter())
            .map(|node| (node.database.clone(), node.schema.clone()))
            .collect()
    }

    /// Lower-cased schema names referenced by the build graph.
    pub fn used_schema_names(&self) -> HashSet<String> {
        self.get_used_schemas()
            .into_iter()
            .map(|(_, schema)| schema.to_lowercase())
            .collect()
    }

    /// Lower-cased (database, schema) pairs referenced by the build graph.
    pub fn used_schema_pairs(&self) -> HashSet<(String, String)> {
        self.get_used_schemas()
            .into_iter()
            .map(|(database, schema)| (database.to_lowercase(), schema.to_lowercase()))
            .collect()
    }

    /// Schema search map over relational, non-ephemeral nodes and all sources.
    pub fn get_catalog_schemas(&self) -> SchemaSearchMap {
        let mut map = SchemaSearchMap::default();
        let relational = self
            .nodes
            .iter()
            .filter(|node| node.is_relational && !node.is_ephemeral_model);
        for node in relational.chain(self.sources.iter()) {
            map.add(node.to_relation());
        }
        map
    }
}

/// Key of a [`SchemaSearchMap`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaKey {
    pub information_schema: InformationSchema,
    pub schema: String,
}

/// Relations to resolve, grouped by (information schema, schema).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaSearchMap {
    entries: BTreeMap<SchemaKey, Vec<Relation>>,
}

impl SchemaSearchMap {
    /// Register a relation under its lower-cased schema; duplicates are
    /// ignored.
    pub fn add(&mut self, relation: Relation) {
        let key = SchemaKey {
            information_schema: relation.information_schema(),
            schema: relation.schema().to_lowercase(),
        };
        let relations = self.entries.entry(key).or_default();
        if !relations.contains(&relation) {
            relations.push(relation);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SchemaKey, &Vec<Relation>)> {
        self.entries.iter()
    }

    /// Distinct information schemas, in order.
    pub fn information_schemas(&self) -> BTreeSet<InformationSchema> {
        self.entries
            .keys()
            .map(|key| key.information_schema.clone())
            .collect()
    }

    /// Schema names searched under `information_schema`.
    pub fn schemas_for(&self, information_schema: &InformationSchema) -> BTreeSet<String> {
        self.entries
            .keys()
            .filter(|key| &key.information_schema == information_schema)
            .map(|key| key.schema.clone())
            .collect()
    }
}
