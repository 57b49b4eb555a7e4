//! The ordered namespace backing one partition.

use arbor_core::{Dn, Entry};
use std::collections::BTreeMap;

/// One partition's durable state: the entry data keyed by DN, and the
/// derived index keys.
///
/// Data keys use the hierarchical `Dn` ordering, which groups every
/// descendant immediately after its ancestor. Index keys are flat strings
/// in plain byte order, suitable for equality and prefix scans.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    pub(crate) data: BTreeMap<Dn, Entry>,
    pub(crate) index: BTreeMap<String, ()>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }
}
