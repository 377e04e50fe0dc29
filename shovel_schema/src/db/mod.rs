//! Database module for shovel_schema
//!
//! This module handles the connection capability and table migration.

pub mod connection;
pub mod migrations;

// Re-export key types
pub use connection::{Connection, Row};
pub use migrations::{migrate, migrate_all};
