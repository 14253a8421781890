//! Error types for lexis.

use thiserror::Error;

use crate::data::DocId;

/// Main error type for lexis operations.
#[derive(Error, Debug)]
pub enum LexisError {
    /// A query named a field the index does not know about.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A query string could not be parsed.
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The write session was already committed.
    #[error("Write session is closed: {0}")]
    SessionClosed(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocId),

    /// Persisted index data failed validation.
    #[error("Corrupt index: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for lexis operations.
pub type Result<T> = std::result::Result<T, LexisError>;

impl LexisError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LexisError::InvalidArgument(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        LexisError::InvalidConfig(msg.into())
    }

    pub fn malformed_query(msg: impl Into<String>) -> Self {
        LexisError::MalformedQuery(msg.into())
    }

    pub fn session_closed(msg: impl Into<String>) -> Self {
        LexisError::SessionClosed(msg.into())
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        LexisError::Corrupt(msg.into())
    }

    /// Whether the request was rejected because of how it was configured or phrased.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            LexisError::UnknownField(_)
                | LexisError::MalformedQuery(_)
                | LexisError::InvalidArgument(_)
                | LexisError::InvalidConfig(_)
        )
    }

    /// Whether the caller misused the write-session lifecycle.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(self, LexisError::SessionClosed(_))
    }
}
