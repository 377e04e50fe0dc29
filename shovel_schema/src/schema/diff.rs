//! Column-level diff against the live catalog
//!
//! Compares a table's declared columns with the columns `information_schema`
//! reports for the same schema-qualified table.

use std::collections::HashSet;

use serde_json::Value;

use crate::db::connection::{Connection, Row};
use crate::error::{Error, Result};
use crate::schema::types::{Column, DiffDetails, DEFAULT_SCHEMA};

const COLUMNS_QUERY: &str = "
    select column_name, data_type
    from information_schema.columns
    where table_schema = $1
    and table_name = $2
";

const CONTEXT: &str = "querying for table info";

/// Fetch the live columns of a table. Order is whatever the catalog returns.
pub async fn live_columns<C: Connection + ?Sized>(
    conn: &C,
    table_name: &str,
    schema: &str,
) -> Result<Vec<Column>> {
    let schema = if schema.is_empty() { DEFAULT_SCHEMA } else { schema };
    tracing::debug!(schema, table = table_name, "Querying catalog columns");

    let rows = conn
        .query(COLUMNS_QUERY, &[schema, table_name])
        .await
        .map_err(|source| Error::Query {
            context: CONTEXT.to_string(),
            source,
        })?;
    rows.iter().map(column_from_row).collect()
}

/// Compute which declared columns are missing and which live ones are undeclared.
///
/// `add` follows declared order and `remove` follows catalog order. Columns are
/// matched by name only; type differences are not reported.
pub async fn diff<C: Connection + ?Sized>(
    conn: &C,
    table_name: &str,
    columns: &[Column],
    schema: &str,
) -> Result<DiffDetails> {
    let live = live_columns(conn, table_name, schema).await?;
    Ok(compare(columns, &live))
}

/// Pure half of [`diff`].
pub fn compare(declared: &[Column], live: &[Column]) -> DiffDetails {
    let live_names: HashSet<&str> = live.iter().map(|c| c.name.as_str()).collect();
    let declared_names: HashSet<&str> = declared.iter().map(|c| c.name.as_str()).collect();

    DiffDetails {
        add: declared
            .iter()
            .filter(|c| !live_names.contains(c.name.as_str()))
            .cloned()
            .collect(),
        remove: live
            .iter()
            .filter(|c| !declared_names.contains(c.name.as_str()))
            .cloned()
            .collect(),
    }
}

fn column_from_row(row: &Row) -> Result<Column> {
    let field = |key: &str| match row.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::Scan {
            context: CONTEXT.to_string(),
            message: format!("column {key} has unexpected value {other}"),
        }),
        None => Err(Error::Scan {
            context: CONTEXT.to_string(),
            message: format!("missing column {key}"),
        }),
    };
    Ok(Column {
        name: field("column_name")?,
        data_type: field("data_type")?,
    })
}
