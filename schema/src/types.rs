//! Attribute-type definitions.

/// An attribute type known to the catalog.
#[derive(Debug, Clone)]
pub struct AttrTypeDef {
    /// Canonical attribute type name.
    pub name: String,
    /// Alternative names resolving to the same type.
    pub aliases: Vec<String>,
    /// Whether the server alone may write this attribute. Immutable
    /// attributes may never be client-supplied on add nor touched by a
    /// modify item.
    pub immutable: bool,
    /// Whether the attribute holds at most one value.
    pub single_value: bool,
    /// Optional value syntax pattern (regex) enforced by the validator.
    pub value_pattern: Option<String>,
}

impl AttrTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            immutable: false,
            single_value: false,
            value_pattern: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn single_value(mut self) -> Self {
        self.single_value = true;
        self
    }

    pub fn with_value_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.value_pattern = Some(pattern.into());
        self
    }
}
