//! Table registry
//!
//! Integrations each declare the table they write to, and several may share
//! one. The registry merges declarations by qualified name so every distinct
//! table gets exactly one `create table` statement.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::Integration;
use crate::schema::types::Table;

/// Merged tables keyed by qualified name, in first-seen order
#[derive(Debug, Default, Clone)]
pub struct TableRegistry {
    tables: IndexMap<String, MergedTable>,
}

#[derive(Debug, Clone)]
struct MergedTable {
    table: Table,
    column_names: HashSet<String>,
}

impl MergedTable {
    fn new(table: &Table) -> Self {
        let mut merged = Self {
            table: Table {
                columns: Vec::with_capacity(table.columns.len()),
                ..table.clone()
            },
            column_names: HashSet::new(),
        };
        merged.union_columns(table);
        merged
    }

    fn union_columns(&mut self, table: &Table) {
        for column in &table.columns {
            if self.column_names.insert(column.name.clone()) {
                self.table.columns.push(column.clone());
            }
        }
    }
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from integrations, in order
    pub fn from_integrations<'a, I>(integrations: I) -> Self
    where
        I: IntoIterator<Item = &'a Integration>,
    {
        let mut registry = Self::new();
        for ig in integrations {
            tracing::trace!(integration = %ig.name, table = %ig.table.qualified_name(), "Registering table");
            registry.register(&ig.table);
        }
        registry
    }

    /// Register a table declaration.
    ///
    /// The first declaration of a qualified name fixes its schema, name and
    /// flags. Later declarations contribute columns not seen yet (appended in
    /// their order) and their unique/index groups, which are concatenated
    /// as-is.
    pub fn register(&mut self, table: &Table) {
        match self.tables.entry(table.qualified_name()) {
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(MergedTable::new(table));
            }
            indexmap::map::Entry::Occupied(mut entry) => {
                let merged = entry.get_mut();
                merged.union_columns(table);
                merged.table.unique.extend(table.unique.iter().cloned());
                merged.table.index.extend(table.index.iter().cloned());
            }
        }
    }

    /// Look up a merged table by qualified name
    pub fn get(&self, qualified_name: &str) -> Option<&Table> {
        self.tables.get(qualified_name).map(|m| &m.table)
    }

    /// Merged tables in first-seen order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values().map(|m| &m.table)
    }

    /// Number of distinct qualified names
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// DDL for every merged table, concatenated in first-seen order
    pub fn ddl(&self) -> Vec<String> {
        self.tables().flat_map(Table::ddl).collect()
    }
}
