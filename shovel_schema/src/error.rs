//! Error types for shovel_schema

use thiserror::Error;

/// Result type for shovel_schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for shovel_schema
#[derive(Error, Debug)]
pub enum Error {
    /// A generated DDL statement was rejected by the database.
    #[error("table {table:?} stmt {statement:?}: {source}")]
    Statement {
        table: String,
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    /// An `alter table ... add column` statement was rejected.
    #[error("adding column {table}/{column}: {source}")]
    AddColumn {
        table: String,
        column: String,
        #[source]
        source: sqlx::Error,
    },

    /// A catalog query could not be executed.
    #[error("{context}: {source}")]
    Query {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    /// A catalog row did not have the expected shape.
    #[error("{context}: {message}")]
    Scan { context: String, message: String },

    #[error("getting diff for {table}: {source}")]
    Diff {
        table: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for failures of catalog introspection rather than of DDL.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Error::Query { .. } | Error::Scan { .. })
    }
}

/// Convert Serde JSON errors to shovel_schema errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

/// Convert YAML errors to shovel_schema errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

/// Convert TOML deserialization errors to shovel_schema errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::Config(error.to_string())
    }
}
