//! Models module for shovel_schema
//!
//! This module merges the tables declared by integrations.

pub mod registry;

// Re-export key types
pub use registry::TableRegistry;
