//! Arbor Index
//!
//! Indices are stored as unique keys in the partition's index map. No data
//! is stored. The keys are made up of the attribute being indexed,
//! concatenated with the entry's DN with the partition suffix stripped.
//!
//! With suffix dc=example,dc=com stripped, the index map sorts as:
//!
//! ```text
//! cn=chunky bacon,cn=chunky bacon,ou=people,
//! cn=chunky bacon,uid=cbacon,ou=accounts,
//! sn=bacon,cn=chunky bacon,ou=people,
//! ```
//!
//! This supports equality, prefix and range scans. One-level searches are
//! indexed as `@<parent-rdn>,<rdn>`:
//!
//! ```text
//! @ou=accounts,uid=cbacon
//! @ou=people,cn=chunky bacon
//! ```
//!
//! All index writes go through the open transaction, so they commit or
//! abort together with the entry they describe.

use arbor_core::{Dn, Entry};
use arbor_store::Transaction;
use tracing::debug;

/// Derive the equality index keys for one attribute of an entry.
fn attr_keys(suffix: &Dn, dn: &Dn, attr: &str, values: &[String]) -> Vec<String> {
    let Some(stripped) = dn.strip_suffix(suffix) else {
        return Vec::new();
    };
    values
        .iter()
        .map(|v| format!("{}={},{}", attr, v.to_ascii_lowercase(), stripped))
        .collect()
}

/// Derive the one-level (RDN) index key, or `None` for the suffix entry
/// itself.
fn rdn_key(suffix: &Dn, dn: &Dn) -> Option<String> {
    let stripped = dn.strip_suffix(suffix)?;
    if stripped.is_empty() {
        return None;
    }
    // Drop the trailing comma separator before splitting off the RDN.
    let stripped = &stripped[..stripped.len() - 1];
    let (rdn, parent) = match stripped.split_once(',') {
        Some((rdn, parent)) => (rdn, parent),
        None => (stripped, ""),
    };
    Some(format!("@{},{}", parent, rdn))
}

/// Index an entry: one key per value of each indexed attribute, plus the
/// RDN key.
pub fn index_entry(
    txn: &mut Transaction<'_>,
    suffix: &Dn,
    indexed_attrs: &[String],
    dn: &Dn,
    entry: &Entry,
) {
    debug!(%dn, "indexing entry");
    for attr in indexed_attrs {
        if let Some(a) = entry.get(attr) {
            for key in attr_keys(suffix, dn, attr, &a.values) {
                txn.index_put(key);
            }
        }
    }
    if let Some(key) = rdn_key(suffix, dn) {
        txn.index_put(key);
    }
}

/// Remove an entry's index keys.
pub fn unindex_entry(
    txn: &mut Transaction<'_>,
    suffix: &Dn,
    indexed_attrs: &[String],
    dn: &Dn,
    entry: &Entry,
) {
    debug!(%dn, "unindexing entry");
    for attr in indexed_attrs {
        if let Some(a) = entry.get(attr) {
            for key in attr_keys(suffix, dn, attr, &a.values) {
                txn.index_del(&key);
            }
        }
    }
    if let Some(key) = rdn_key(suffix, dn) {
        txn.index_del(&key);
    }
}

/// Reconstruct the full DN from an index key and the partition suffix.
///
/// `sn=bacon,cn=chunky bacon,ou=people,` with suffix `dc=example,dc=com`
/// yields `cn=chunky bacon,ou=people,dc=example,dc=com`;
/// `@ou=people,cn=chunky bacon` yields the same. Returns `None` for a
/// malformed key.
pub fn index_to_dn(suffix: &Dn, index_key: &str) -> Option<Dn> {
    if let Some(rest) = index_key.strip_prefix('@') {
        // One-level key: rdn is the last component, parent the rest.
        let (parent, rdn) = rest.rsplit_once(',')?;
        let full = if parent.is_empty() {
            format!("{},{}", rdn, suffix)
        } else {
            format!("{},{},{}", rdn, parent, suffix)
        };
        Some(Dn::parse(&full))
    } else {
        // Attribute key: skip the attr=value part, append the suffix.
        let (_, stripped) = index_key.split_once(',')?;
        Some(Dn::parse(&format!("{}{}", stripped, suffix)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_core::entry;
    use arbor_store::Partition;

    fn suffix() -> Dn {
        Dn::parse("dc=example,dc=com")
    }

    #[test]
    fn test_index_entry_writes_attr_and_rdn_keys() {
        // GIVEN
        let p: Partition<()> = Partition::new(suffix());
        let mut txn = p.begin().unwrap();
        let dn = Dn::parse("cn=chunky bacon,ou=people,dc=example,dc=com");
        let e = entry! { "cn" => ["Chunky Bacon"], "sn" => ["Bacon"] };

        // WHEN
        index_entry(&mut txn, &suffix(), &["sn".to_string()], &dn, &e);

        // THEN
        let keys: Vec<_> = txn.index_keys().collect();
        assert_eq!(
            keys,
            vec![
                "@ou=people,cn=chunky bacon",
                "sn=bacon,cn=chunky bacon,ou=people,",
            ]
        );
    }

    #[test]
    fn test_unindex_entry_removes_keys() {
        // GIVEN
        let p: Partition<()> = Partition::new(suffix());
        let mut txn = p.begin().unwrap();
        let dn = Dn::parse("cn=chunky bacon,ou=people,dc=example,dc=com");
        let e = entry! { "sn" => ["Bacon"] };
        index_entry(&mut txn, &suffix(), &["sn".to_string()], &dn, &e);

        // WHEN
        unindex_entry(&mut txn, &suffix(), &["sn".to_string()], &dn, &e);

        // THEN
        assert_eq!(txn.index_keys().count(), 0);
    }

    #[test]
    fn test_suffix_entry_has_no_rdn_key() {
        // GIVEN
        let p: Partition<()> = Partition::new(suffix());
        let mut txn = p.begin().unwrap();

        // WHEN
        index_entry(&mut txn, &suffix(), &[], &suffix(), &Entry::new());

        // THEN
        assert_eq!(txn.index_keys().count(), 0);
    }

    #[test]
    fn test_first_level_entry_has_empty_parent_rdn() {
        // GIVEN
        let dn = Dn::parse("ou=people,dc=example,dc=com");

        // THEN
        assert_eq!(rdn_key(&suffix(), &dn), Some("@,ou=people".to_string()));
    }

    #[test]
    fn test_index_to_dn_roundtrips_attr_key() {
        // GIVEN
        let key = "sn=bacon,cn=chunky bacon,ou=people,";

        // WHEN
        let dn = index_to_dn(&suffix(), key).unwrap();

        // THEN
        assert_eq!(dn, Dn::parse("cn=chunky bacon,ou=people,dc=example,dc=com"));
    }

    #[test]
    fn test_index_to_dn_roundtrips_rdn_key() {
        // GIVEN
        let one_level = "@ou=people,cn=chunky bacon";
        let first_level = "@,ou=people";

        // THEN
        assert_eq!(
            index_to_dn(&suffix(), one_level).unwrap(),
            Dn::parse("cn=chunky bacon,ou=people,dc=example,dc=com")
        );
        assert_eq!(
            index_to_dn(&suffix(), first_level).unwrap(),
            Dn::parse("ou=people,dc=example,dc=com")
        );
    }
}
