//! Repository for the advisory `course_state` cache.

use sqlx::PgPool;

use nurture_core::projection::CourseState;
use nurture_core::types::Timestamp;

use crate::models::course_state::CourseStateRow;

/// Column list for `course_state` queries.
const COURSE_STATE_COLUMNS: &str =
    "lead_id, current_section, completion_pct, last_activity_at, updated_at";

/// Read/write operations on the course-state cache. The cache is
/// advisory: the projector in `nurture-core` can always rebuild it
/// from the ledger.
pub struct CourseStateRepo;

impl CourseStateRepo {
    /// Write the projector's snapshot for a lead, replacing any cached
    /// row. `now` is the caller-injected refresh time.
    pub async fn upsert(
        pool: &PgPool,
        lead_id: &str,
        state: &CourseState,
        now: Timestamp,
    ) -> Result<CourseStateRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO course_state \
                (lead_id, current_section, completion_pct, last_activity_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (lead_id) DO UPDATE SET \
                current_section = $2, \
                completion_pct = $3, \
                last_activity_at = $4, \
                updated_at = $5 \
             RETURNING {COURSE_STATE_COLUMNS}"
        );
        sqlx::query_as::<_, CourseStateRow>(&query)
            .bind(lead_id)
            .bind(&state.current_section)
            .bind(state.completion_pct)
            .bind(state.last_activity_at)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Cached snapshot for a lead, if one has been computed.
    pub async fn find_by_lead(
        pool: &PgPool,
        lead_id: &str,
    ) -> Result<Option<CourseStateRow>, sqlx::Error> {
        let query = format!("SELECT {COURSE_STATE_COLUMNS} FROM course_state WHERE lead_id = $1");
        sqlx::query_as::<_, CourseStateRow>(&query)
            .bind(lead_id)
            .fetch_optional(pool)
            .await
    }
}
