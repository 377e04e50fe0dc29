//! Schema module for shovel_schema
//!
//! This module handles declared tables, DDL generation, catalog diffs and
//! display-only introspection.

pub mod analyzer;
pub mod diff;
pub mod generator;
pub mod quote;
pub mod types;

// Re-export key types
pub use analyzer::Inspection;
pub use diff::diff;
pub use generator::generate_ddl;
pub use quote::quote;
pub use types::{Column, DiffDetails, Table};
