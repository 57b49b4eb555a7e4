//! Partition resolution and referrals.

use crate::partition::Partition;
use arbor_core::Dn;
use std::sync::Arc;

/// The set of local partitions, plus referral targets for keys served
/// elsewhere. Every key belongs to at most one partition; keys outside all
/// partitions are either referred or rejected as naming violations.
pub struct Directory<R> {
    partitions: Vec<Arc<Partition<R>>>,
    referrals: Vec<(Dn, Vec<String>)>,
}

impl<R> Directory<R> {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
            referrals: Vec::new(),
        }
    }

    /// Add a local partition.
    pub fn partition(mut self, partition: Partition<R>) -> Self {
        self.partitions.push(Arc::new(partition));
        self
    }

    /// Add referral targets for keys under a foreign suffix.
    pub fn referral(mut self, suffix: Dn, targets: Vec<String>) -> Self {
        self.referrals.push((suffix, targets));
        self
    }

    /// Resolve a key to the one partition whose suffix contains it.
    pub fn resolve(&self, dn: &Dn) -> Option<Arc<Partition<R>>> {
        self.partitions
            .iter()
            .find(|p| dn.has_suffix(p.suffix()))
            .cloned()
    }

    /// Referral targets for a key outside all local partitions.
    pub fn referrals(&self, dn: &Dn) -> Option<Vec<String>> {
        self.referrals
            .iter()
            .find(|(suffix, _)| dn.has_suffix(suffix))
            .map(|(_, targets)| targets.clone())
    }

    /// All local partitions.
    pub fn partitions(&self) -> impl Iterator<Item = &Arc<Partition<R>>> {
        self.partitions.iter()
    }
}
