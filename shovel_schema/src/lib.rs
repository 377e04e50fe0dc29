//! shovel_schema: declarative table synchronization for Postgres
//!
//! Integrations declare the table they write to. shovel_schema turns those
//! declarations into idempotent DDL, merges tables shared between
//! integrations, and adds missing columns to tables that already exist.
//! It never drops or retypes columns.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod utils;

// Re-export main types for easier access
pub use config::{Integration, Root};
pub use db::connection::{Connection, Row};
pub use db::migrations::{migrate, migrate_all};
pub use error::{Error, Result};
pub use models::TableRegistry;
pub use schema::analyzer::{indexes, row_estimate, table_size, Inspection};
pub use schema::diff::diff;
pub use schema::generator::generate_ddl;
pub use schema::quote::quote;
pub use schema::types::{Column, DiffDetails, Table};
