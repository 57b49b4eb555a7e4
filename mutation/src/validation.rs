//! Collaborator seams: write authorization and entry validation.

use crate::error::{MutationError, MutationResult};
use arbor_core::{Dn, Entry};
use arbor_schema::Schema;
use regex_lite::Regex;
use std::sync::Arc;

/// The access-control decision function. External policy; the write path
/// only consumes the verdict.
pub trait Authorizer: Send + Sync {
    /// May `identity` (None when anonymous) write at `dn` within the
    /// partition rooted at `suffix`?
    fn allow_write(&self, identity: Option<&str>, suffix: &Dn, dn: &Dn) -> bool;
}

/// Permit-everything policy, for embedding and tests.
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn allow_write(&self, _identity: Option<&str>, _suffix: &Dn, _dn: &Dn) -> bool {
        true
    }
}

/// Validates a candidate entry after all edits are applied, honoring the
/// partition's relax flag.
pub trait EntryValidator: Send + Sync {
    fn validate(&self, dn: &Dn, entry: &Entry, relax: bool) -> MutationResult<()>;
}

/// Schema-backed validator: every attribute must be known (unless relaxed),
/// single-valued types hold one value, and values match their declared
/// syntax pattern.
pub struct SchemaValidator {
    schema: Arc<Schema>,
}

impl SchemaValidator {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }
}

impl EntryValidator for SchemaValidator {
    fn validate(&self, _dn: &Dn, entry: &Entry, relax: bool) -> MutationResult<()> {
        for attr in entry.attributes() {
            let Some(def) = self.schema.lookup(&attr.name) else {
                if relax {
                    continue;
                }
                return Err(MutationError::unknown_attribute_type(&attr.name));
            };
            if def.single_value && attr.values.len() > 1 {
                return Err(MutationError::too_many_values(&attr.name));
            }
            if let Some(pattern) = &def.value_pattern {
                // Patterns were syntax-checked at schema build.
                let Ok(re) = Regex::new(pattern) else {
                    continue;
                };
                if attr.values.iter().any(|v| !re.is_match(v)) {
                    return Err(MutationError::invalid_value(&attr.name));
                }
            }
        }
        Ok(())
    }
}
