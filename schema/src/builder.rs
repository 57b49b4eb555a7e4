//! SchemaBuilder for constructing an immutable Schema.

use crate::{AttrTypeDef, Schema};
use regex_lite::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during schema construction.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Duplicate attribute type name: {0}")]
    DuplicateAttrType(String),

    #[error("Invalid attribute descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid value pattern for {name}: {pattern}")]
    InvalidValuePattern { name: String, pattern: String },
}

/// Result type for schema construction.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Builder for constructing an immutable Schema.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    attr_types: Vec<AttrTypeDef>,
}

impl SchemaBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute type definition.
    pub fn attr_type(mut self, def: AttrTypeDef) -> Self {
        self.attr_types.push(def);
        self
    }

    /// Validate all definitions and build the immutable schema.
    pub fn build(self) -> SchemaResult<Schema> {
        // Attribute descriptor syntax: keystring per the protocol grammar.
        let descriptor = Regex::new("^[A-Za-z][A-Za-z0-9-]*$").expect("static regex");

        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (i, def) in self.attr_types.iter().enumerate() {
            for name in std::iter::once(&def.name).chain(def.aliases.iter()) {
                if !descriptor.is_match(name) {
                    return Err(SchemaError::InvalidDescriptor(name.clone()));
                }
                if by_name.insert(name.to_ascii_lowercase(), i).is_some() {
                    return Err(SchemaError::DuplicateAttrType(name.clone()));
                }
            }
            if let Some(pattern) = &def.value_pattern {
                if Regex::new(pattern).is_err() {
                    return Err(SchemaError::InvalidValuePattern {
                        name: def.name.clone(),
                        pattern: pattern.clone(),
                    });
                }
            }
        }

        Ok(Schema::new(self.attr_types, by_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        // GIVEN
        let schema = SchemaBuilder::new()
            .attr_type(AttrTypeDef::new("cn").alias("commonName"))
            .attr_type(AttrTypeDef::new("entryUUID").immutable().single_value())
            .build()
            .unwrap();

        // THEN
        assert!(schema.lookup("CN").is_some());
        assert!(schema.lookup("commonname").is_some());
        assert!(schema.lookup("entryUUID").unwrap().immutable);
        assert!(schema.lookup("mail").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        // GIVEN
        let result = SchemaBuilder::new()
            .attr_type(AttrTypeDef::new("cn"))
            .attr_type(AttrTypeDef::new("CN"))
            .build();

        // THEN
        assert!(matches!(result, Err(SchemaError::DuplicateAttrType(_))));
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        // GIVEN
        let result = SchemaBuilder::new()
            .attr_type(AttrTypeDef::new("2bad"))
            .build();

        // THEN
        assert!(matches!(result, Err(SchemaError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_invalid_value_pattern_rejected() {
        // GIVEN
        let result = SchemaBuilder::new()
            .attr_type(AttrTypeDef::new("mail").with_value_pattern("("))
            .build();

        // THEN
        assert!(matches!(result, Err(SchemaError::InvalidValuePattern { .. })));
    }
}
