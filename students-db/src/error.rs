//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error (creating the database file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No student with this id.
    #[error("student not found: {0}")]
    NotFound(i64),

    /// A previous holder of the connection panicked.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

