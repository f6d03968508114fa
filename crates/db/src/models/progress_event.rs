//! Progress event entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nurture_core::types::Timestamp;

/// A row from the append-only `progress_events` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressEvent {
    pub id: String,
    pub lead_id: String,
    pub section_id: String,
    pub occurred_at: Timestamp,
}

/// DTO for recording a progress event. `event_id` is the ledger's
/// idempotency key: the caller derives it deterministically per
/// lead + section attempt so retries collapse into one row.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordProgressEvent {
    pub event_id: String,
    pub lead_id: String,
    pub section_id: String,
    pub occurred_at: String,
}
