//! Exclusive transactions over one partition's namespace.
//!
//! A transaction holds the partition's exclusive slot and a working copy of
//! the namespace. All reads and writes during a mutation go through the
//! transaction only. `commit` publishes the working copy; dropping the
//! transaction without committing discards it, so abort is infallible and
//! restores the pre-transaction state exactly.

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use arbor_core::{Dn, Entry};
use parking_lot::MutexGuard;
use std::ops::Bound;

/// An open transaction on one partition.
pub struct Transaction<'p> {
    slot: MutexGuard<'p, Namespace>,
    work: Namespace,
}

impl<'p> Transaction<'p> {
    pub(crate) fn new(slot: MutexGuard<'p, Namespace>) -> Self {
        let work = slot.clone();
        Self { slot, work }
    }

    /// Read the entry at a key.
    pub fn get(&self, dn: &Dn) -> Option<&Entry> {
        self.work.data.get(dn)
    }

    /// Insert an entry at an unoccupied key.
    pub fn put(&mut self, dn: Dn, entry: Entry) -> StoreResult<()> {
        if self.work.data.contains_key(&dn) {
            return Err(StoreError::KeyExists(dn));
        }
        self.work.data.insert(dn, entry);
        Ok(())
    }

    /// Overwrite the entry at an existing key.
    pub fn update(&mut self, dn: &Dn, entry: Entry) -> StoreResult<()> {
        match self.work.data.get_mut(dn) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(StoreError::NotFound(dn.clone())),
        }
    }

    /// Delete the entry at a key.
    pub fn del(&mut self, dn: &Dn) -> StoreResult<()> {
        match self.work.data.remove(dn) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(dn.clone())),
        }
    }

    /// Put a derived index key (idempotent).
    pub fn index_put(&mut self, key: String) {
        self.work.index.insert(key, ());
    }

    /// Delete a derived index key if present.
    pub fn index_del(&mut self, key: &str) {
        self.work.index.remove(key);
    }

    /// Iterate index keys in byte order (scans and tests).
    pub fn index_keys(&self) -> impl Iterator<Item = &str> {
        self.work.index.keys().map(String::as_str)
    }

    /// Open a cursor over this transaction's live view of the data.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            work: &self.work,
            pos: None,
        }
    }

    /// Make all writes performed under this transaction durable and
    /// visible, and release the exclusive slot.
    pub fn commit(mut self) {
        *self.slot = std::mem::take(&mut self.work);
    }

    /// Discard all writes and release the exclusive slot. Dropping an
    /// uncommitted transaction has the same effect.
    pub fn abort(self) {}
}

/// An ordered cursor over an open transaction.
///
/// The two motions the leaf check needs: position at an exact key, then
/// step to the next key in store order.
pub struct Cursor<'t> {
    work: &'t Namespace,
    pos: Option<Dn>,
}

impl<'t> Cursor<'t> {
    /// Position at exactly `dn`, failing `NotFound` if absent.
    pub fn seek_exact(&mut self, dn: &Dn) -> StoreResult<&'t Entry> {
        match self.work.data.get(dn) {
            Some(entry) => {
                self.pos = Some(dn.clone());
                Ok(entry)
            }
            None => Err(StoreError::NotFound(dn.clone())),
        }
    }

    /// Step to the next key in store order, or `None` past the last key.
    pub fn next(&mut self) -> Option<(&'t Dn, &'t Entry)> {
        let start = match self.pos.take() {
            Some(pos) => Bound::Excluded(pos),
            None => Bound::Unbounded,
        };
        let (dn, entry) = self.work.data.range((start, Bound::Unbounded)).next()?;
        self.pos = Some(dn.clone());
        Some((dn, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Partition;
    use arbor_core::entry;

    fn partition() -> Partition<()> {
        Partition::new(Dn::parse("dc=x"))
    }

    #[test]
    fn test_commit_publishes_writes() {
        // GIVEN
        let p = partition();
        let mut txn = p.begin().unwrap();
        txn.put(Dn::parse("cn=a,dc=x"), entry! { "cn" => ["a"] })
            .unwrap();

        // WHEN
        txn.commit();

        // THEN
        let txn = p.begin().unwrap();
        assert!(txn.get(&Dn::parse("cn=a,dc=x")).is_some());
    }

    #[test]
    fn test_drop_discards_writes() {
        // GIVEN
        let p = partition();
        {
            let mut txn = p.begin().unwrap();
            txn.put(Dn::parse("cn=a,dc=x"), Entry::new()).unwrap();
            // WHEN: dropped without commit
        }

        // THEN
        let txn = p.begin().unwrap();
        assert!(txn.get(&Dn::parse("cn=a,dc=x")).is_none());
    }

    #[test]
    fn test_put_fails_on_occupied_key() {
        // GIVEN
        let p = partition();
        let mut txn = p.begin().unwrap();
        txn.put(Dn::parse("cn=a,dc=x"), Entry::new()).unwrap();

        // WHEN
        let result = txn.put(Dn::parse("cn=a,dc=x"), Entry::new());

        // THEN
        assert!(matches!(result, Err(StoreError::KeyExists(_))));
    }

    #[test]
    fn test_update_and_del_require_existing_key() {
        // GIVEN
        let p = partition();
        let mut txn = p.begin().unwrap();

        // THEN
        assert!(matches!(
            txn.update(&Dn::parse("cn=a,dc=x"), Entry::new()),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            txn.del(&Dn::parse("cn=a,dc=x")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_cursor_exact_then_next() {
        // GIVEN
        let p = partition();
        let mut txn = p.begin().unwrap();
        txn.put(Dn::parse("cn=a,dc=x"), Entry::new()).unwrap();
        txn.put(Dn::parse("cn=b,cn=a,dc=x"), Entry::new()).unwrap();
        txn.put(Dn::parse("cn=c,dc=x"), Entry::new()).unwrap();

        // WHEN
        let mut cursor = txn.cursor();
        cursor.seek_exact(&Dn::parse("cn=a,dc=x")).unwrap();
        let (next, _) = cursor.next().unwrap();

        // THEN: the descendant follows its ancestor directly
        assert_eq!(next, &Dn::parse("cn=b,cn=a,dc=x"));
    }

    #[test]
    fn test_cursor_next_past_last_key() {
        // GIVEN
        let p = partition();
        let mut txn = p.begin().unwrap();
        txn.put(Dn::parse("cn=a,dc=x"), Entry::new()).unwrap();

        // WHEN
        let mut cursor = txn.cursor();
        cursor.seek_exact(&Dn::parse("cn=a,dc=x")).unwrap();

        // THEN
        assert!(cursor.next().is_none());
    }
}
