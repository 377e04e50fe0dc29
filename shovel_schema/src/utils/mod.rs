//! Utilities for shovel_schema
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{index_name, unique_index_name};
