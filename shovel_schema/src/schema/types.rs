//! Type definitions for declared tables and catalog diffs

use serde::{Deserialize, Serialize};

/// Schema used for catalog lookups when a table does not name one.
pub const DEFAULT_SCHEMA: &str = "public";

/// Represents a table column
///
/// The type is a raw SQL literal (`integer`, `numeric`, `bytea`, ...) and is
/// emitted verbatim. Columns are identified by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    /// Create a new column with the given name and type
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
        }
    }
}

/// Represents a declared table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disable_unique: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given name in the default schema
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Place the table in a named schema
    pub fn in_schema(mut self, schema: &str) -> Self {
        self.schema = schema.to_string();
        self
    }

    /// Append a column
    pub fn column(mut self, name: &str, data_type: &str) -> Self {
        self.add_column(Column::new(name, data_type));
        self
    }

    /// Add a column to the table
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Add a group of columns backed by a unique index
    pub fn add_unique<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.unique
            .push(columns.iter().map(|c| c.as_ref().to_string()).collect());
    }

    /// Add a group of columns backed by a plain index
    pub fn add_index<S: AsRef<str>>(&mut self, columns: &[S]) {
        self.index
            .push(columns.iter().map(|c| c.as_ref().to_string()).collect());
    }

    /// The table name with schema prefix if a schema is specified
    pub fn qualified_name(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }

    /// The schema to look the table up under in `information_schema`
    pub fn catalog_schema(&self) -> &str {
        if self.schema.is_empty() {
            DEFAULT_SCHEMA
        } else {
            &self.schema
        }
    }

    /// Check whether a column with this name is declared
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// Column-level difference between a declared table and the live catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffDetails {
    /// Declared columns missing from the catalog, in declared order.
    pub add: Vec<Column>,
    /// Catalog columns that are not declared. Never dropped.
    pub remove: Vec<Column>,
}

impl DiffDetails {
    /// Check if the diff is empty (no changes detected)
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }
}
