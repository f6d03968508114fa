//! Sync outbox entity model and status vocabulary.
//!
//! Outbox rows record that a hot lead needs (or received) a push to a
//! downstream CRM. No network calls happen anywhere in this codebase;
//! the rows are plain audit storage consumed by an external worker.

use serde::Serialize;
use sqlx::FromRow;

use nurture_core::error::CoreError;
use nurture_core::types::Timestamp;

/// Default outbox destination label.
pub const DESTINATION_GHL: &str = "GHL";

/// Outbox row statuses.
pub const SYNC_STATUS_NEEDS_SYNC: &str = "NEEDS_SYNC";
pub const SYNC_STATUS_SENT: &str = "SENT";
pub const SYNC_STATUS_FAILED: &str = "FAILED";

/// All valid outbox statuses.
pub const VALID_SYNC_STATUSES: &[&str] =
    &[SYNC_STATUS_NEEDS_SYNC, SYNC_STATUS_SENT, SYNC_STATUS_FAILED];

/// Validate a status filter value.
pub fn validate_sync_status(status: &str) -> Result<(), CoreError> {
    if VALID_SYNC_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid sync status '{status}'. Must be one of: {}",
            VALID_SYNC_STATUSES.join(", ")
        )))
    }
}

/// A row from the `sync_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncRecord {
    pub id: i64,
    pub lead_id: String,
    pub destination: String,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
