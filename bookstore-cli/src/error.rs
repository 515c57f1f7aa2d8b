//! CLI error types and result alias.

use bookstore_mongodb::MongoError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(bookstore::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(bookstore::config))]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    #[diagnostic(code(bookstore::database))]
    Database(#[from] MongoError),

    /// Seed data error
    #[error("Seed error: {0}")]
    #[diagnostic(code(bookstore::seed))]
    Seed(String),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(format!("Failed to serialize TOML: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Seed(format!("Failed to parse seed JSON: {}", err))
    }
}
