//! Course invite entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use nurture_core::types::Timestamp;

/// A row from the `course_invites` table. Immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseInvite {
    pub id: String,
    pub lead_id: String,
    pub sent_at: Timestamp,
    pub channel: Option<String>,
}

/// DTO for recording an invite. `sent_at` is a caller-supplied
/// timestamp string, parsed (and timezone-checked) before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseInvite {
    pub invite_id: String,
    pub sent_at: Option<String>,
    pub channel: Option<String>,
}
