//! Arbor Store
//!
//! Per-partition ordered key-value storage with exclusive transactions.
//!
//! Responsibilities:
//! - Own one ordered namespace (entry data + index keys) per partition
//! - Expose begin/commit/abort with a single-writer invariant and a
//!   non-blocking busy signal
//! - Queue requests that hit a busy partition for FIFO retry
//! - Resolve a key to its partition, or to referral targets

mod directory;
mod error;
mod namespace;
mod partition;
mod txn;

pub use directory::Directory;
pub use error::{StoreError, StoreResult};
pub use namespace::Namespace;
pub use partition::{Partition, Retryable, DEFAULT_QUEUE_DEPTH};
pub use txn::{Cursor, Transaction};
