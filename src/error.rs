use thiserror::Error;

/// Main error type for the schemadoc system
#[derive(Error, Debug)]
pub enum SchemaDocError {
    #[error("Invalid output mode '{mode}': expected 'plain' or 'decorated'")]
    InvalidOutputMode { mode: String },

    #[error("Introspection error: {message}")]
    Introspection { message: String },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the library
pub type SchemaDocResult<T> = Result<T, SchemaDocError>;

impl SchemaDocError {
    pub fn invalid_output_mode(mode: impl Into<String>) -> Self {
        Self::InvalidOutputMode { mode: mode.into() }
    }

    pub fn introspection(message: impl Into<String>) -> Self {
        Self::Introspection { message: message.into() }
    }

    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot { message: message.into() }
    }
}
