//! Store error types.

use arbor_core::Dn;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another transaction is already open on this partition.
    #[error("partition is busy")]
    Busy,

    /// The key is not present in the store.
    #[error("key not found: {0}")]
    NotFound(Dn),

    /// An insert hit an occupied key.
    #[error("key already exists: {0}")]
    KeyExists(Dn),

    /// The retry queue is at capacity.
    #[error("retry queue is full")]
    QueueFull,

    /// Retry was requested while the partition was not busy.
    #[error("partition is not busy")]
    NotBusy,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
