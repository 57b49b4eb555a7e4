//! Add operation - entry creation.

use crate::error::{MutationError, MutationResult};
use crate::sysattr::{current_timestamp, generate_unique_id};
use crate::validation::EntryValidator;
use arbor_core::{sys_attr, Dn, Entry};
use arbor_schema::Schema;
use arbor_store::{Partition, Transaction};
use tracing::debug;

/// Screen an incoming entry against the schema before any transaction is
/// opened, so rejection is cheap: every attribute type must be known, and
/// none may be server-maintained. The partition's relax flag does not
/// reach this screen; it loosens only the post-edit validator.
pub fn screen_add(schema: &Schema, entry: &Entry) -> MutationResult<()> {
    for attr in entry.attributes() {
        let Some(def) = schema.lookup(&attr.name) else {
            debug!(attr = %attr.name, "unknown attribute type");
            return Err(MutationError::unknown_attribute_type(&attr.name));
        };
        if def.immutable {
            debug!(attr = %attr.name, "attempt to add immutable attribute");
            return Err(MutationError::immutable_attribute(&attr.name));
        }
    }
    Ok(())
}

/// Create the entry at `dn` inside an open transaction: inject the system
/// attributes, validate the complete entry, insert at an unoccupied key,
/// and index it.
pub fn apply_add<R>(
    validator: &dyn EntryValidator,
    partition: &Partition<R>,
    txn: &mut Transaction<'_>,
    dn: &Dn,
    mut entry: Entry,
    bind_dn: Option<&str>,
) -> MutationResult<()> {
    entry.put(
        sys_attr::CREATORS_NAME,
        vec![bind_dn.unwrap_or_default().to_string()],
    );
    entry.put(sys_attr::CREATE_TIMESTAMP, vec![current_timestamp()]);
    entry.put(sys_attr::ENTRY_UUID, vec![generate_unique_id()]);

    validator.validate(dn, &entry, partition.relax())?;

    txn.put(dn.clone(), entry.clone())?;
    arbor_index::index_entry(txn, partition.suffix(), partition.indexed_attrs(), dn, &entry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SchemaValidator;
    use arbor_core::entry;
    use arbor_schema::{AttrTypeDef, SchemaBuilder};
    use std::sync::Arc;

    fn schema() -> Arc<Schema> {
        Arc::new(
            SchemaBuilder::new()
                .attr_type(AttrTypeDef::new("cn"))
                .attr_type(AttrTypeDef::new("entryUUID").immutable().single_value())
                .attr_type(AttrTypeDef::new("creatorsName").immutable())
                .attr_type(AttrTypeDef::new("createTimestamp").immutable())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_screen_rejects_unknown_type() {
        // GIVEN
        let e = entry! { "shoeSize" => ["42"] };

        // THEN
        assert!(matches!(
            screen_add(&schema(), &e),
            Err(MutationError::UnknownAttributeType { .. })
        ));
    }

    #[test]
    fn test_screen_rejects_immutable_attribute() {
        // GIVEN: a client-supplied entryUUID
        let e = entry! { "cn" => ["a"], "entryUUID" => ["cafebabe"] };

        // THEN
        assert!(matches!(
            screen_add(&schema(), &e),
            Err(MutationError::ImmutableAttribute { .. })
        ));
    }

    #[test]
    fn test_apply_add_injects_system_attributes() {
        // GIVEN
        let schema = schema();
        let validator = SchemaValidator::new(schema);
        let p: Partition<()> = Partition::new(Dn::parse("dc=x"));
        let mut txn = p.begin().unwrap();
        let dn = Dn::parse("cn=a,dc=x");

        // WHEN
        apply_add(
            &validator,
            &p,
            &mut txn,
            &dn,
            entry! { "cn" => ["a"] },
            Some("cn=admin,dc=x"),
        )
        .unwrap();

        // THEN
        let stored = txn.get(&dn).unwrap();
        assert_eq!(
            stored.get("creatorsName").unwrap().values,
            vec!["cn=admin,dc=x"]
        );
        assert_eq!(stored.get("entryUUID").unwrap().values.len(), 1);
        assert!(stored.contains("createTimestamp"));
    }

    #[test]
    fn test_apply_add_anonymous_creator_is_empty() {
        // GIVEN
        let validator = SchemaValidator::new(schema());
        let p: Partition<()> = Partition::new(Dn::parse("dc=x"));
        let mut txn = p.begin().unwrap();
        let dn = Dn::parse("cn=a,dc=x");

        // WHEN
        apply_add(&validator, &p, &mut txn, &dn, entry! { "cn" => ["a"] }, None).unwrap();

        // THEN
        assert_eq!(
            txn.get(&dn).unwrap().get("creatorsName").unwrap().values,
            vec![""]
        );
    }

    #[test]
    fn test_apply_add_occupied_key() {
        // GIVEN
        let validator = SchemaValidator::new(schema());
        let p: Partition<()> = Partition::new(Dn::parse("dc=x"));
        let mut txn = p.begin().unwrap();
        let dn = Dn::parse("cn=a,dc=x");
        apply_add(&validator, &p, &mut txn, &dn, entry! { "cn" => ["a"] }, None).unwrap();

        // WHEN
        let result = apply_add(&validator, &p, &mut txn, &dn, entry! { "cn" => ["a"] }, None);

        // THEN
        assert!(matches!(
            result,
            Err(MutationError::Store(arbor_store::StoreError::KeyExists(_)))
        ));
    }
}
