//! In-memory stand-in for a Postgres catalog.
//!
//! Understands exactly the statement shapes shovel_schema emits and answers
//! the `information_schema.columns` query from what it has seen.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use shovel_schema::{Column, Connection, Row};

#[derive(Default)]
struct State {
    schemas: HashSet<String>,
    tables: IndexMap<(String, String), Vec<Column>>,
    indexes: Vec<String>,
    executed: Vec<String>,
    fail_statements: Vec<String>,
    fail_queries: bool,
    canned: Vec<(String, Vec<Row>)>,
}

#[derive(Default)]
pub struct MockCatalog {
    state: Mutex<State>,
}

fn split_qualified(name: &str) -> (String, String) {
    match name.split_once('.') {
        Some((schema, table)) => (schema.to_string(), table.to_string()),
        None => ("public".to_string(), name.to_string()),
    }
}

fn unquote(name: &str) -> String {
    name.trim_matches('"').to_string()
}

fn protocol(msg: impl Into<String>) -> sqlx::Error {
    sqlx::Error::Protocol(msg.into())
}

pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}

impl MockCatalog {
    pub fn new() -> Self {
        let catalog = Self::default();
        catalog.state.lock().unwrap().schemas.insert("public".into());
        catalog
    }

    /// Pretend a table already exists with these columns.
    pub fn with_table(self, schema: &str, table: &str, columns: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.schemas.insert(schema.to_string());
            state.tables.insert(
                (schema.to_string(), table.to_string()),
                columns.iter().map(|(n, t)| Column::new(n, t)).collect(),
            );
        }
        self
    }

    /// Reject any statement containing `fragment`.
    pub fn failing_statement(self, fragment: &str) -> Self {
        self.state.lock().unwrap().fail_statements.push(fragment.to_string());
        self
    }

    /// Reject every query.
    pub fn failing_queries(self) -> Self {
        self.state.lock().unwrap().fail_queries = true;
        self
    }

    /// Answer queries containing `fragment` with `rows`.
    pub fn answering(self, fragment: &str, rows: Vec<Row>) -> Self {
        self.state.lock().unwrap().canned.push((fragment.to_string(), rows));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub fn clear_executed(&self) {
        self.state.lock().unwrap().executed.clear();
    }

    pub fn columns(&self, schema: &str, table: &str) -> Option<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(&(schema.to_string(), table.to_string()))
            .map(|cols| cols.iter().map(|c| c.name.clone()).collect())
    }

    pub fn has_schema(&self, schema: &str) -> bool {
        self.state.lock().unwrap().schemas.contains(schema)
    }

    pub fn index_statements(&self) -> Vec<String> {
        self.state.lock().unwrap().indexes.clone()
    }
}

fn apply(state: &mut State, sql: &str) -> Result<(), sqlx::Error> {
    if let Some(schema) = sql.strip_prefix("create schema if not exists ") {
        state.schemas.insert(schema.to_string());
        return Ok(());
    }

    if let Some(rest) = sql.strip_prefix("create table if not exists ") {
        let open = rest.find('(').ok_or_else(|| protocol("syntax error"))?;
        let key = split_qualified(&rest[..open]);
        if !state.schemas.contains(&key.0) {
            return Err(protocol(format!("schema \"{}\" does not exist", key.0)));
        }
        let body = rest[open + 1..].trim_end_matches(')');
        let columns = body
            .split(", ")
            .map(|def| {
                let (name, ty) = def.split_once(' ').unwrap_or((def, ""));
                Column::new(&unquote(name), ty)
            })
            .collect();
        state.tables.entry(key).or_insert(columns);
        return Ok(());
    }

    if sql.starts_with("create unique index if not exists ") || sql.starts_with("create index if not exists ") {
        let on = sql.find(" on ").ok_or_else(|| protocol("syntax error"))?;
        let rest = &sql[on + 4..];
        let table = rest.split(' ').next().unwrap_or_default();
        if !state.tables.contains_key(&split_qualified(table)) {
            return Err(protocol(format!("relation \"{}\" does not exist", table)));
        }
        state.indexes.push(sql.to_string());
        return Ok(());
    }

    if let Some(rest) = sql.strip_prefix("alter table ") {
        let (table, def) = rest
            .split_once(" add column if not exists ")
            .ok_or_else(|| protocol("syntax error"))?;
        let (name, ty) = def.split_once(' ').unwrap_or((def, ""));
        let columns = state
            .tables
            .get_mut(&split_qualified(table))
            .ok_or_else(|| protocol(format!("relation \"{}\" does not exist", table)))?;
        let name = unquote(name);
        if !columns.iter().any(|c| c.name == name) {
            columns.push(Column::new(&name, ty));
        }
        return Ok(());
    }

    Err(protocol(format!("unsupported statement: {sql}")))
}

#[async_trait]
impl Connection for MockCatalog {
    async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        state.executed.push(sql.to_string());
        if state.fail_statements.iter().any(|f| sql.contains(f.as_str())) {
            return Err(protocol("permission denied"));
        }
        apply(&mut state, sql)?;
        Ok(0)
    }

    async fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Row>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        if state.fail_queries {
            return Err(protocol("connection reset"));
        }
        if let Some((_, rows)) = state.canned.iter().find(|(f, _)| sql.contains(f.as_str())) {
            return Ok(rows.clone());
        }
        if sql.contains("information_schema.columns") {
            let key = (params[0].to_string(), params[1].to_string());
            let rows = state
                .tables
                .get(&key)
                .map(|cols| {
                    cols.iter()
                        .map(|c| row(&[("column_name", c.name.as_str()), ("data_type", c.data_type.as_str())]))
                        .collect()
                })
                .unwrap_or_default();
            return Ok(rows);
        }
        Err(protocol(format!("unsupported query: {sql}")))
    }
}
