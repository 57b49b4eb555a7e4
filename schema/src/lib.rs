//! Arbor Schema
//!
//! The attribute-type catalog: maps attribute-type names to their
//! definitions (known/unknown, immutability, value syntax). Consulted,
//! never mutated, by the write path.
//!
//! Built once with [`SchemaBuilder`], immutable thereafter.

mod builder;
mod schema;
mod types;

pub use builder::{SchemaBuilder, SchemaError, SchemaResult};
pub use schema::Schema;
pub use types::AttrTypeDef;
