//! The Schema - immutable attribute-type lookup.

use crate::AttrTypeDef;
use std::collections::HashMap;

/// The Schema provides runtime lookup of attribute-type definitions.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Schema {
    /// Attribute type definitions.
    attr_types: Vec<AttrTypeDef>,
    /// Case-folded name (and alias) lookup into `attr_types`.
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub(crate) fn new(attr_types: Vec<AttrTypeDef>, by_name: HashMap<String, usize>) -> Self {
        Self {
            attr_types,
            by_name,
        }
    }

    /// Look up an attribute type by name or alias, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&AttrTypeDef> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.attr_types[i])
    }

}
