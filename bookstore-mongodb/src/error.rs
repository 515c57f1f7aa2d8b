//! Error types for bookstore operations.

use mongodb::error::ErrorKind;
use thiserror::Error;

/// Result type for bookstore operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Server error code for `IndexOptionsConflict`.
pub const INDEX_OPTIONS_CONFLICT: i32 = 85;

/// Server error code for `IndexKeySpecsConflict`.
pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

/// Server error code for `IndexAlreadyExists`.
pub const INDEX_ALREADY_EXISTS: i32 = 68;

/// Errors that can occur while talking to the books collection.
#[derive(Error, Debug)]
pub enum MongoError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// BSON deserialization error.
    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Malformed response or query.
    #[error("query error: {0}")]
    Query(String),

    /// An index with the same keys or name already exists with a different definition.
    #[error("index conflict: {0}")]
    IndexConflict(String),

    /// Caller supplied an argument the operation cannot use.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is an index conflict.
    pub fn is_index_conflict(&self) -> bool {
        matches!(self, Self::IndexConflict(_))
    }

    /// Reclassify a driver error raised by `createIndexes`.
    ///
    /// Conflicting index definitions become [`MongoError::IndexConflict`];
    /// everything else is returned unchanged.
    pub fn from_index_error(err: mongodb::error::Error) -> Self {
        match server_code(&err) {
            Some(code) if is_index_conflict_code(code) => Self::IndexConflict(err.to_string()),
            _ => Self::Driver(err),
        }
    }
}

/// Whether a server error code means the requested index clashes with an existing one.
pub fn is_index_conflict_code(code: i32) -> bool {
    matches!(
        code,
        INDEX_OPTIONS_CONFLICT | INDEX_KEY_SPECS_CONFLICT | INDEX_ALREADY_EXISTS
    )
}

/// Extract the server error code from a command failure, if any.
fn server_code(err: &mongodb::error::Error) -> Option<i32> {
    match err.kind.as_ref() {
        ErrorKind::Command(command) => Some(command.code),
        _ => None,
    }
}
