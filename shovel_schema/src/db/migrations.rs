//! Table migration
//!
//! This module brings the live catalog in line with declared tables: run the
//! table's DDL, diff the catalog, then add whatever columns are missing.
//! Columns are never dropped or retyped, and nothing runs in a transaction;
//! every statement is guarded with `if not exists` so a failed run can simply
//! be repeated.

use crate::db::connection::Connection;
use crate::error::{Error, Result};
use crate::schema::diff::diff;
use crate::schema::generator::add_column_sql;
use crate::schema::types::Table;

/// Migrate a single table.
pub async fn migrate<C: Connection + ?Sized>(conn: &C, table: &Table) -> Result<()> {
    let table_name = table.qualified_name();

    for statement in table.ddl() {
        tracing::debug!(table = %table_name, sql = %statement, "Executing DDL");
        if let Err(source) = conn.execute(&statement).await {
            return Err(Error::Statement {
                table: table_name,
                statement,
                source,
            });
        }
    }

    let dd = diff(conn, &table.name, &table.columns, &table.schema)
        .await
        .map_err(|e| Error::Diff {
            table: table_name.clone(),
            source: Box::new(e),
        })?;

    if !dd.remove.is_empty() {
        let undeclared: Vec<&str> = dd.remove.iter().map(|c| c.name.as_str()).collect();
        tracing::warn!(
            table = %table_name,
            columns = ?undeclared,
            "Table has columns that are not declared; leaving them in place"
        );
    }

    for column in &dd.add {
        let sql = add_column_sql(table, column);
        if let Err(source) = conn.execute(&sql).await {
            return Err(Error::AddColumn {
                table: table_name,
                column: column.name.clone(),
                source,
            });
        }
        tracing::info!(table = %table_name, column = %column.name, data_type = %column.data_type, "Added column");
    }

    tracing::info!(table = %table_name, added = dd.add.len(), "Table migrated");
    Ok(())
}

/// Migrate tables in order, stopping at the first failure.
pub async fn migrate_all<'a, C, I>(conn: &C, tables: I) -> Result<()>
where
    C: Connection + ?Sized,
    I: IntoIterator<Item = &'a Table>,
{
    for table in tables {
        migrate(conn, table).await?;
    }
    Ok(())
}
