use std::path::PathBuf;

/// Errors from key-value backend operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage facility is disabled or otherwise unreachable.
    #[error("storage unavailable")]
    Unavailable,

    /// Writing the entry would exceed the backend's byte quota.
    #[error("quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The on-disk document cannot be decoded.
    #[error("corrupt store file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
