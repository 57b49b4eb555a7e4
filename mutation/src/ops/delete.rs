//! Delete operation - leaf-checked entry removal.

use crate::error::{MutationError, MutationResult};
use arbor_core::Dn;
use arbor_store::{Partition, StoreError, Transaction};
use tracing::debug;

/// Delete the entry at `dn` inside an open transaction.
///
/// The leaf check positions a cursor at exactly `dn` and steps once: the
/// hierarchical store order places every descendant immediately after its
/// ancestor, so if the next key has `dn` as a structural suffix the entry
/// has children and cannot be deleted.
pub fn apply_delete<R>(
    partition: &Partition<R>,
    txn: &mut Transaction<'_>,
    dn: &Dn,
) -> MutationResult<()> {
    let entry = {
        let mut cursor = txn.cursor();
        let entry = match cursor.seek_exact(dn) {
            Ok(entry) => entry.clone(),
            Err(StoreError::NotFound(_)) => return Err(MutationError::no_such_object(dn)),
            Err(e) => return Err(e.into()),
        };
        if let Some((next, _)) = cursor.next() {
            if dn.is_ancestor_of(next) {
                debug!(%dn, child = %next, "delete rejected, entry has children");
                return Err(MutationError::not_leaf(dn));
            }
        }
        entry
    };

    arbor_index::unindex_entry(txn, partition.suffix(), partition.indexed_attrs(), dn, &entry);
    txn.del(dn)?;
    Ok(())
}
