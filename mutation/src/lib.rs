//! Arbor Mutation
//!
//! The write path of the directory: turns a decoded add, delete, or modify
//! request into an atomic mutation of one partition's store.
//!
//! Control flow per request: normalize the target key, resolve its
//! partition (or refer), authorize, begin an exclusive transaction (busy
//! requests may queue for FIFO retry), run the operation body, validate the
//! resulting entry, then commit or abort. Exactly one protocol result code
//! reaches the requester per request.
//!
//! Operation bodies live in `ops/`:
//! - `ops/add.rs` - entry creation with system-attribute injection
//! - `ops/delete.rs` - leaf-checked entry deletion
//! - `ops/modify.rs` - ordered attribute edits with provenance stamping

mod engine;
mod error;
mod ops;
mod request;
mod sysattr;
mod validation;

pub use engine::WriteEngine;
pub use error::{MutationError, MutationResult};
pub use request::{ModifyItem, ModifyKind, Responder, WriteOp, WriteRequest};
pub use sysattr::{current_timestamp, generate_unique_id};
pub use validation::{AllowAll, Authorizer, EntryValidator, SchemaValidator};
