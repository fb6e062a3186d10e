//! Error types for formkit core operations.
//!
//! Validation failures and derived-value failures are not errors at this
//! level: the evaluators return messages and fallback values instead.
//! `FormError` covers configuration problems, store misuse and storage
//! backend failures. The CLI layer maps these to user-facing messages.

use thiserror::Error;

/// Result type alias for formkit operations.
pub type Result<T> = std::result::Result<T, FormError>;

/// Core error type for formkit operations.
#[derive(Debug, Error)]
pub enum FormError {
    /// Schema configuration error
    #[error("Schema error: {0}")]
    Schema(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Derived fields depend on each other in a loop
    #[error("Derived field dependency cycle: {}", fields.join(" -> "))]
    DependencyCycle { fields: Vec<String> },

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl FormError {
    /// Whether this error reports a derived-field dependency cycle.
    pub fn is_dependency_cycle(&self) -> bool {
        matches!(self, FormError::DependencyCycle { .. })
    }
}
