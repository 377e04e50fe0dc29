//! Database connection handling
//!
//! This module defines the connection capability the migrator and the
//! catalog queries run against, and implements it for a Postgres pool.

use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Column as _, PgPool, Row as _, TypeInfo as _};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// A result row: column name to value, in select-list order.
pub type Row = IndexMap<String, Value>;

/// Statement execution and parameterized queries.
///
/// Every call is an independent statement; implementations must not wrap
/// calls in a transaction.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a statement that returns no rows, yielding rows affected.
    async fn execute(&self, sql: &str) -> std::result::Result<u64, sqlx::Error>;

    /// Run a query with text parameters bound to `$1..$n`.
    async fn query(&self, sql: &str, params: &[&str]) -> std::result::Result<Vec<Row>, sqlx::Error>;
}

/// Create a Postgres pool from configuration
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool_size = config.pool_size.unwrap_or(10);
    let timeout_seconds = config.timeout_seconds.unwrap_or(30);

    let pool = PgPoolOptions::new()
        .max_connections(pool_size)
        .acquire_timeout(Duration::from_secs(timeout_seconds))
        .connect(&config.url)
        .await?;

    tracing::debug!(pool_size, timeout_seconds, "Connected to postgres");
    Ok(pool)
}

#[async_trait]
impl Connection for PgPool {
    async fn execute(&self, sql: &str) -> std::result::Result<u64, sqlx::Error> {
        let done = sqlx::query(sql).execute(self).await?;
        Ok(done.rows_affected())
    }

    async fn query(&self, sql: &str, params: &[&str]) -> std::result::Result<Vec<Row>, sqlx::Error> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(param.to_string());
        }
        let rows = query.fetch_all(self).await?;
        rows.iter().map(row_to_map).collect()
    }
}

fn row_to_map(row: &PgRow) -> std::result::Result<Row, sqlx::Error> {
    let mut map = Row::with_capacity(row.len());
    for (i, column) in row.columns().iter().enumerate() {
        let value = match column.type_info().name() {
            "BOOL" => row.try_get::<Option<bool>, _>(i)?.map(Value::from),
            "INT2" => row.try_get::<Option<i16>, _>(i)?.map(Value::from),
            "INT4" => row.try_get::<Option<i32>, _>(i)?.map(Value::from),
            "INT8" => row.try_get::<Option<i64>, _>(i)?.map(Value::from),
            "FLOAT4" => row.try_get::<Option<f32>, _>(i)?.map(Value::from),
            "FLOAT8" => row.try_get::<Option<f64>, _>(i)?.map(Value::from),
            // Catalog identifiers come back as `name` or information_schema
            // domains; their wire form is plain text.
            _ => row.try_get_unchecked::<Option<String>, _>(i)?.map(Value::from),
        };
        map.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }
    Ok(map)
}
