//! Table introspection for display
//!
//! These helpers feed dashboards and CLI output. They never return an error:
//! a failed query becomes a value carrying the message (an `error` row for
//! [`indexes`], [`Inspection::Unavailable`] otherwise), so one broken lookup
//! cannot abort the caller.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::db::connection::{Connection, Row};

/// Result of a display-only catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Inspection<T> {
    Value(T),
    Unavailable { error: String },
}

impl<T> Inspection<T> {
    fn unavailable(error: impl ToString) -> Self {
        Inspection::Unavailable {
            error: error.to_string(),
        }
    }

    /// The looked-up value, if the lookup succeeded
    pub fn value(&self) -> Option<&T> {
        match self {
            Inspection::Value(v) => Some(v),
            Inspection::Unavailable { .. } => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Inspection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inspection::Value(v) => v.fmt(f),
            Inspection::Unavailable { error } => f.write_str(error),
        }
    }
}

const NO_ROWS: &str = "no rows in result set";

/// Rows of `pg_indexes` (`indexname`, `indexdef`) for a table.
///
/// On failure the result is still a list: one row holding `error`.
pub async fn indexes<C: Connection + ?Sized>(conn: &C, table: &str) -> Vec<Row> {
    const Q: &str = "
        select indexname, indexdef
        from pg_indexes
        where tablename = $1
    ";
    match conn.query(Q, &[table]).await {
        Ok(rows) => rows,
        Err(e) => {
            let mut row = Row::new();
            row.insert("error".to_string(), Value::from(e.to_string()));
            vec![row]
        }
    }
}

/// Planner row estimate, formatted with thousands separators.
///
/// Tables that have never been analyzed report `"pending"`.
pub async fn row_estimate<C: Connection + ?Sized>(conn: &C, table: &str) -> Inspection<String> {
    const Q: &str = "
        select trim(to_char(reltuples, '999,999,999,999'))
        from pg_class
        where relname = $1
    ";
    let estimate = match scalar(conn, Q, table).await {
        Ok(s) => s,
        Err(e) => return Inspection::unavailable(e),
    };
    if estimate == "0" || estimate.starts_with('-') {
        Inspection::Value("pending".to_string())
    } else {
        Inspection::Value(estimate)
    }
}

/// Total on-disk size of a table including indexes, e.g. `"16 kB"`.
pub async fn table_size<C: Connection + ?Sized>(conn: &C, table: &str) -> Inspection<String> {
    const Q: &str = "select pg_size_pretty(pg_total_relation_size($1::regclass))";
    match scalar(conn, Q, table).await {
        Ok(s) => Inspection::Value(s),
        Err(e) => Inspection::unavailable(e),
    }
}

async fn scalar<C: Connection + ?Sized>(conn: &C, sql: &str, param: &str) -> Result<String, String> {
    let rows = conn.query(sql, &[param]).await.map_err(|e| e.to_string())?;
    let value = rows
        .first()
        .and_then(|row| row.values().next())
        .ok_or_else(|| NO_ROWS.to_string())?;
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err("cannot scan NULL into string".to_string()),
        other => Ok(other.to_string()),
    }
}
