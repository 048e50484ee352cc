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

//! Relations: the adapter's handle for a queryable table or view.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    Table,
    View,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which identifier parts are rendered with double quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuotePolicy {
    pub database: bool,
    pub schema: bool,
    pub identifier: bool,
}

impl QuotePolicy {
    pub const ALL: QuotePolicy = QuotePolicy {
        database: true,
        schema: true,
        identifier: true,
    };
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self::ALL
    }
}

/// A column as known to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub ordinal: Option<usize>,
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ordinal: None,
            comment: None,
        }
    }
}

/// The information schema of a database, the scope of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InformationSchema {
    pub database: String,
}

impl InformationSchema {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

impl fmt::Display for InformationSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\".information_schema", self.database)
    }
}

/// A table or view addressed by (database, schema, identifier).
///
/// Relations are built once and only read afterwards; the `with_*` methods
/// consume the value and are meant for construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    database: String,
    schema: String,
    identifier: Option<String>,
    relation_type: Option<RelationType>,
    columns: Vec<ColumnDescriptor>,
    quote_policy: QuotePolicy,
}

impl Relation {
    pub fn create(
        database: impl Into<String>,
        schema: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            identifier: Some(identifier.into()),
            relation_type: None,
            columns: Vec::new(),
            quote_policy: QuotePolicy::default(),
        }
    }

    /// A relation naming a whole schema, as passed to relation listing.
    pub fn schema_only(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            identifier: None,
            ..Self::create(database, schema, "")
        }
    }

    pub fn with_type(mut self, relation_type: RelationType) -> Self {
        self.relation_type = Some(relation_type);
        self
    }

    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_quote_policy(mut self, quote_policy: QuotePolicy) -> Self {
        self.quote_policy = quote_policy;
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn relation_type(&self) -> Option<RelationType> {
        self.relation_type
    }

    /// Column information carried from the catalog, storage columns first.
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn quote_policy(&self) -> QuotePolicy {
        self.quote_policy
    }

    pub fn information_schema(&self) -> InformationSchema {
        InformationSchema::new(self.database.clone())
    }

    fn render_part(part: &str, quote: bool) -> String {
        if quote {
            format!("\"{}\"", part)
        } else {
            part.to_string()
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![
            Self::render_part(&self.database, self.quote_policy.database),
            Self::render_part(&self.schema, self.quote_policy.schema),
        ];
        if let Some(ref identifier) = self.identifier {
            parts.push(Self::render_part(identifier, self.quote_policy.identifier));
        }
        f.write_str(&parts.join("."))
    }
}
