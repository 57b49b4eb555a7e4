//! Entry and attribute structures.
//!
//! An entry is the value stored at one key: an insertion-ordered collection
//! of attributes with case-insensitively unique names. Values are opaque
//! strings from the store's perspective; semantic comparison belongs to the
//! schema and the validator. An attribute with zero values does not exist.

/// A named set of values within an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type name as supplied by the client.
    pub name: String,
    /// Value set, in insertion order.
    pub values: Vec<String>,
}

impl Attribute {
    /// Create a new attribute with the given values.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Union the given values into the set, preserving first-seen order.
    pub fn merge_values(&mut self, values: &[String]) {
        for v in values {
            if !self.values.contains(v) {
                self.values.push(v.clone());
            }
        }
    }

    /// Remove exactly the given values from the set.
    pub fn remove_values(&mut self, values: &[String]) {
        self.values.retain(|v| !values.contains(v));
    }

    /// Replace the value set outright.
    pub fn set_values(&mut self, values: Vec<String>) {
        self.values = values;
    }

    /// True once the value set is empty (the attribute should be dropped).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The attribute collection stored at one key.
///
/// Iteration order is insertion order; it carries no semantics beyond
/// display. Name lookup is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    attrs: Vec<Attribute>,
}

impl Entry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get a mutable attribute by case-insensitive name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// True if the entry carries the named attribute.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Union values into the named attribute, creating it if absent.
    pub fn merge(&mut self, name: &str, values: &[String]) {
        match self.get_mut(name) {
            Some(attr) => attr.merge_values(values),
            None => {
                if !values.is_empty() {
                    self.attrs.push(Attribute::new(name, values.to_vec()));
                }
            }
        }
    }

    /// Replace the named attribute's value set, creating the attribute if
    /// absent. An empty value set removes the attribute.
    pub fn put(&mut self, name: &str, values: Vec<String>) {
        if values.is_empty() {
            self.remove(name);
            return;
        }
        match self.get_mut(name) {
            Some(attr) => attr.set_values(values),
            None => self.attrs.push(Attribute::new(name, values)),
        }
    }

    /// Remove the named attribute entirely.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let pos = self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos))
    }

    /// Remove exactly the given values from the named attribute, dropping
    /// the attribute once its value set is empty. A missing attribute is a
    /// no-op.
    pub fn remove_values(&mut self, name: &str, values: &[String]) {
        if let Some(attr) = self.get_mut(name) {
            attr.remove_values(values);
            if attr.is_empty() {
                self.remove(name);
            }
        }
    }

    /// Iterate attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if the entry carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl FromIterator<Attribute> for Entry {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut entry = Entry::new();
        for attr in iter {
            entry.merge(&attr.name, &attr.values);
        }
        entry
    }
}

/// Construct an entry from `name => [values...]` pairs.
#[macro_export]
macro_rules! entry {
    () => { $crate::Entry::new() };
    ($($name:expr => [$($value:expr),* $(,)?]),* $(,)?) => {{
        let mut e = $crate::Entry::new();
        $(e.put($name, vec![$($value.to_string()),*]);)*
        e
    }};
}
