//! Cached course-state row.

use serde::Serialize;
use sqlx::FromRow;

use nurture_core::types::Timestamp;

/// A row from the advisory `course_state` cache. The authoritative
/// value is whatever `nurture_core::projection` derives from the
/// ledger; this row only saves recomputation on list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CourseStateRow {
    pub lead_id: String,
    pub current_section: Option<String>,
    pub completion_pct: Option<f64>,
    pub last_activity_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}
