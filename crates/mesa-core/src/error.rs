//! Error types for mesa operations.
//!
//! Every component catches its own underlying failures and converts them
//! into one of these variants; nothing crosses the command boundary as an
//! uncaught fault.

use thiserror::Error;

/// Result type alias for mesa operations.
pub type MesaResult<T> = Result<T, MesaError>;

/// Main error type for all mesa operations.
#[derive(Error, Debug)]
pub enum MesaError {
    /// Content extraction failed.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Text classification failed (model load or inference).
    #[error("Classification error for model '{model}': {message}")]
    Classification { model: String, message: String },

    /// Natural-language-to-SQL translation failed.
    #[error("Translation error for model '{model}': {message}")]
    Translation { model: String, message: String },

    /// Schema store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Query execution failed.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MesaError {
    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create a classification error for a given model identifier.
    pub fn classification(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Classification {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create a translation error for a given model identifier.
    pub fn translation(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Translation {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}
