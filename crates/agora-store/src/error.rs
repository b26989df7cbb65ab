use std::time::Duration;

use agora_types::ItemId;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer in time.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record with the same identifier already exists.
    #[error("duplicate record: {0}")]
    Duplicate(ItemId),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
