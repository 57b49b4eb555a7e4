//! Distinguished names.
//!
//! A `Dn` is a normalized, case-folded hierarchical key. Two keys are in a
//! parent/child relationship iff one is a proper right-hand suffix of the
//! other after a comma boundary.
//!
//! `Ord` compares RDN components right to left (root end first), so a sorted
//! store places every descendant of a key immediately after it and before
//! any sibling. The delete leaf check relies on this grouping: one cursor
//! step past a key decides whether it has children.

use std::cmp::Ordering;
use std::fmt;

/// A normalized distinguished name.
///
/// Normalization case-folds the whole name and strips whitespace around the
/// `,` and `=` separators, so equal names compare byte-equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dn(String);

impl Dn {
    /// Parse and normalize a raw distinguished name.
    pub fn parse(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        for (i, rdn) in raw.split(',').enumerate() {
            if i > 0 {
                out.push(',');
            }
            match rdn.split_once('=') {
                Some((attr, value)) => {
                    out.push_str(&attr.trim().to_ascii_lowercase());
                    out.push('=');
                    out.push_str(&value.trim().to_ascii_lowercase());
                }
                None => out.push_str(&rdn.trim().to_ascii_lowercase()),
            }
        }
        Dn(out)
    }

    /// The normalized text of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the zero-length name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if `self` is a strict ancestor of `other`: `other` ends with
    /// `,self` (a proper right-hand suffix after a comma boundary).
    pub fn is_ancestor_of(&self, other: &Dn) -> bool {
        let child = other.as_str();
        let suffix = self.as_str();
        child.len() > suffix.len()
            && child.ends_with(suffix)
            && child.as_bytes()[child.len() - suffix.len() - 1] == b','
    }

    /// True if this name lies at or under `suffix`.
    pub fn has_suffix(&self, suffix: &Dn) -> bool {
        self == suffix || suffix.is_ancestor_of(self)
    }

    /// The leftmost relative name component.
    pub fn rdn(&self) -> &str {
        match self.0.split_once(',') {
            Some((rdn, _)) => rdn,
            None => &self.0,
        }
    }

    /// The name with the leftmost component removed, or `None` for a
    /// single-component or empty name.
    pub fn parent(&self) -> Option<Dn> {
        self.0.split_once(',').map(|(_, rest)| Dn(rest.to_string()))
    }

    /// Strip a partition suffix, keeping the trailing comma separator.
    ///
    /// `cn=a,ou=p,dc=x` minus suffix `dc=x` is `cn=a,ou=p,`; a name equal
    /// to its suffix strips to the empty string. Returns `None` if this name
    /// does not lie under `suffix`. Index keys are built from this form.
    pub fn strip_suffix(&self, suffix: &Dn) -> Option<&str> {
        if !self.has_suffix(suffix) {
            return None;
        }
        Some(&self.0[..self.0.len() - suffix.0.len()])
    }

    /// RDN components from the root end inward.
    fn components_rev(&self) -> impl Iterator<Item = &str> {
        self.0.rsplit(',')
    }
}

impl Ord for Dn {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.components_rev();
        let mut b = other.components_rev();
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) => match x.cmp(y) {
                    Ordering::Equal => continue,
                    ord => return ord,
                },
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
            }
        }
    }
}

impl PartialOrd for Dn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Dn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Dn {
    fn from(raw: &str) -> Self {
        Dn::parse(raw)
    }
}
