//! Mutation error types.

use arbor_core::{Dn, ResultCode};
use arbor_store::StoreError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur during a write operation. Each maps to exactly one
/// protocol result code.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("No such object: {dn}")]
    NoSuchObject { dn: Dn },

    #[error("Entry has children: {dn}")]
    NotLeaf { dn: Dn },

    #[error("Entry already exists: {dn}")]
    AlreadyExists { dn: Dn },

    #[error("Unknown attribute type: {name}")]
    UnknownAttributeType { name: String },

    #[error("Attribute is server-maintained: {name}")]
    ImmutableAttribute { name: String },

    #[error("Value violates syntax of {attr}")]
    InvalidValue { attr: String },

    #[error("Single-valued attribute given multiple values: {attr}")]
    TooManyValues { attr: String },

    #[error("Store fault: {0}")]
    Store(#[from] StoreError),
}

impl MutationError {
    pub fn no_such_object(dn: &Dn) -> Self {
        Self::NoSuchObject { dn: dn.clone() }
    }

    pub fn not_leaf(dn: &Dn) -> Self {
        Self::NotLeaf { dn: dn.clone() }
    }

    pub fn unknown_attribute_type(name: impl Into<String>) -> Self {
        Self::UnknownAttributeType { name: name.into() }
    }

    pub fn immutable_attribute(name: impl Into<String>) -> Self {
        Self::ImmutableAttribute { name: name.into() }
    }

    pub fn invalid_value(attr: impl Into<String>) -> Self {
        Self::InvalidValue { attr: attr.into() }
    }

    pub fn too_many_values(attr: impl Into<String>) -> Self {
        Self::TooManyValues { attr: attr.into() }
    }

    /// The protocol result code this failure surfaces as.
    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::NoSuchObject { .. } => ResultCode::NoSuchObject,
            Self::NotLeaf { .. } => ResultCode::NotAllowedOnNonLeaf,
            Self::AlreadyExists { .. } => ResultCode::AlreadyExists,
            Self::UnknownAttributeType { .. } => ResultCode::NoSuchAttributeType,
            Self::ImmutableAttribute { .. } => ResultCode::ConstraintViolation,
            Self::InvalidValue { .. } => ResultCode::ConstraintViolation,
            Self::TooManyValues { .. } => ResultCode::ConstraintViolation,
            Self::Store(StoreError::KeyExists(_)) => ResultCode::AlreadyExists,
            Self::Store(StoreError::NotFound(_)) => ResultCode::NoSuchObject,
            Self::Store(StoreError::Busy) => ResultCode::Busy,
            Self::Store(_) => ResultCode::Other,
        }
    }
}
