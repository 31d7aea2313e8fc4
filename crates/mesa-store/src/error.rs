//! Storage error types.

use thiserror::Error;

/// Errors that can occur in the schema store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A schema cannot be inferred from zero records.
    #[error("Cannot infer a schema from an empty record set")]
    EmptyRecordSet,

    /// The named table does not exist in the database.
    #[error("No such table: '{0}'")]
    NoSuchTable(String),

    /// A name could not be turned into a valid SQL identifier.
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Underlying SQLite failure.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error creating the backing storage location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for mesa_core::MesaError {
    fn from(err: StorageError) -> Self {
        mesa_core::MesaError::Storage(err.to_string())
    }
}
