//! Arbor Core Types
//!
//! This crate provides the foundational types used throughout the arbor
//! directory server:
//! - Distinguished names (Dn) and their hierarchy relation
//! - Entry and Attribute structures (the value stored at a key)
//! - Protocol result codes and responses

mod dn;
mod entry;
mod result;

pub use dn::*;
pub use entry::*;
pub use result::*;
