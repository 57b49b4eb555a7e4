//! System-maintained attribute values.
//!
//! Provenance and identifier values the engine injects itself; clients
//! never author these.

use chrono::Utc;
use uuid::Uuid;

/// A freshly generated unique identifier for `entryUUID`, string-encoded.
pub fn generate_unique_id() -> String {
    Uuid::new_v4().to_string()
}

/// The current time in the protocol's GeneralizedTime format, for
/// `createTimestamp`/`modifyTimestamp`.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y%m%d%H%M%SZ").to_string()
}
