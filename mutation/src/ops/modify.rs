//! Modify operation - ordered attribute edits.

use crate::error::{MutationError, MutationResult};
use crate::request::{ModifyItem, ModifyKind};
use crate::sysattr::current_timestamp;
use crate::validation::EntryValidator;
use arbor_core::{sys_attr, Dn};
use arbor_schema::Schema;
use arbor_store::{Partition, Transaction};
use tracing::debug;

/// Apply an ordered list of modify items to the entry at `dn` inside an
/// open transaction, validate the result, stamp modification provenance,
/// and persist.
pub fn apply_modify<R>(
    schema: &Schema,
    validator: &dyn EntryValidator,
    partition: &Partition<R>,
    txn: &mut Transaction<'_>,
    dn: &Dn,
    items: &[ModifyItem],
    bind_dn: Option<&str>,
) -> MutationResult<()> {
    let original = match txn.get(dn) {
        Some(entry) => entry.clone(),
        None => return Err(MutationError::no_such_object(dn)),
    };
    let mut entry = original.clone();

    for item in items {
        let def = schema.lookup(&item.attr);
        if def.is_none() && !partition.relax() {
            debug!(attr = %item.attr, "unknown attribute type");
            return Err(MutationError::unknown_attribute_type(&item.attr));
        }
        if def.is_some_and(|d| d.immutable) {
            debug!(attr = %item.attr, "attempt to modify immutable attribute");
            return Err(MutationError::immutable_attribute(&item.attr));
        }

        match item.kind {
            ModifyKind::Add => entry.merge(&item.attr, &item.values),
            ModifyKind::Delete => {
                if item.values.is_empty() {
                    entry.remove(&item.attr);
                } else {
                    entry.remove_values(&item.attr, &item.values);
                }
            }
            ModifyKind::Replace => entry.put(&item.attr, item.values.clone()),
        }
    }

    validator.validate(dn, &entry, partition.relax())?;

    entry.put(
        sys_attr::MODIFIERS_NAME,
        vec![bind_dn.unwrap_or_default().to_string()],
    );
    entry.put(sys_attr::MODIFY_TIMESTAMP, vec![current_timestamp()]);

    let suffix = partition.suffix();
    let indexed = partition.indexed_attrs();
    arbor_index::unindex_entry(txn, suffix, indexed, dn, &original);
    arbor_index::index_entry(txn, suffix, indexed, dn, &entry);

    // The key exists by construction; update cannot miss.
    txn.update(dn, entry)?;
    Ok(())
}
