//! Configuration handling for shovel_schema

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::db::connection::Connection;
use crate::db::migrations::migrate_all;
use crate::error::{Error, Result};
use crate::models::TableRegistry;
use crate::schema::types::Table;

/// Load configuration from a TOML, JSON or YAML file, chosen by extension
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Root> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let root: Root = match extension.as_str() {
        "toml" => toml::from_str(&config_str)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?,
        "json" => serde_json::from_str(&config_str)?,
        "yaml" | "yml" => serde_yaml::from_str(&config_str)?,
        other => {
            return Err(Error::Config(format!(
                "Unsupported config file extension: {:?}",
                other
            )))
        }
    };

    Ok(root)
}

/// Represents the complete configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Root {
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

/// An integration and the table it writes to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Integration {
    pub name: String,
    pub table: Table,
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
    pub file: Option<String>,
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_stdout() -> bool {
    true
}

impl Root {
    /// Merge the integrations' tables by qualified name
    pub fn tables(&self) -> TableRegistry {
        TableRegistry::from_integrations(&self.integrations)
    }

    /// DDL for every merged table
    pub fn ddl(&self) -> Vec<String> {
        self.tables().ddl()
    }

    /// Migrate every merged table in first-seen order
    pub async fn migrate<C: Connection + ?Sized>(&self, conn: &C) -> Result<()> {
        let registry = self.tables();
        migrate_all(conn, registry.tables()).await
    }
}
