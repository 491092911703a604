use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for repository, migration, and storage failures.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Book not found: {0}")]
    BookNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, BookError>;

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        BookError::StorageError(err.to_string())
    }
}
