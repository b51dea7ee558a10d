//! Error types for the store layer.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing a pending-action queue.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while touching the queue file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A queue record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The queue file is held by another process.
    #[error("queue file locked: another process has exclusive access")]
    Locked,
}
