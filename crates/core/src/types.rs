/// Lead, invite, and event identifiers are stable caller-assigned TEXT keys.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
