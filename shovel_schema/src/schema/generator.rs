//! DDL generator
//!
//! This module turns a declared [`Table`] into the ordered, idempotent
//! statements that create it.

use crate::schema::quote::{quote, quote_list};
use crate::schema::types::{Column, Table};
use crate::utils::naming::{index_name, unique_index_name};

/// Generate the DDL for a table.
///
/// Statements come out in this order: `create schema` (only when the table
/// names a schema), `create table`, one `create unique index` per unique
/// group, one `create index` per index group. A table without columns
/// produces nothing.
pub fn generate_ddl(table: &Table) -> Vec<String> {
    if table.columns.is_empty() {
        return Vec::new();
    }
    let mut statements = Vec::new();

    if !table.schema.is_empty() {
        statements.push(create_schema_sql(&table.schema));
    }

    let table_name = table.qualified_name();
    statements.push(create_table_sql(table, &table_name));

    for columns in &table.unique {
        statements.push(format!(
            "create unique index if not exists {} on {} ({})",
            unique_index_name(&table.name),
            table_name,
            quote_list(columns),
        ));
    }

    for columns in &table.index {
        statements.push(format!(
            "create index if not exists {} on {} ({})",
            index_name(columns),
            table_name,
            quote_list(columns),
        ));
    }

    statements
}

/// `create schema if not exists <schema>`
pub fn create_schema_sql(schema: &str) -> String {
    format!("create schema if not exists {}", schema)
}

fn create_table_sql(table: &Table, table_name: &str) -> String {
    let column_defs = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quote(&c.name), c.data_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!("create table if not exists {}({})", table_name, column_defs)
}

/// `alter table <qualified> add column if not exists <col> <type>`
pub fn add_column_sql(table: &Table, column: &Column) -> String {
    format!(
        "alter table {} add column if not exists {} {}",
        table.qualified_name(),
        quote(&column.name),
        column.data_type,
    )
}

impl Table {
    /// Generate the DDL for this table, see [`generate_ddl`].
    pub fn ddl(&self) -> Vec<String> {
        generate_ddl(self)
    }
}
