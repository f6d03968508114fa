//! Repository for the `course_invites` table.

use sqlx::PgPool;

use nurture_core::types::Timestamp;

use crate::models::course_invite::CourseInvite;

/// Column list for `course_invites` queries.
const COURSE_INVITE_COLUMNS: &str = "id, lead_id, sent_at, channel";

/// Read/write operations for course invites. Rows are immutable after
/// creation; a duplicate invite id is a no-op, not an error.
pub struct CourseInviteRepo;

impl CourseInviteRepo {
    /// Insert an invite, returning whether a row was written. Same
    /// caught-conflict idempotency as the progress ledger.
    pub async fn insert(
        pool: &PgPool,
        invite_id: &str,
        lead_id: &str,
        sent_at: Timestamp,
        channel: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO course_invites (id, lead_id, sent_at, channel) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(invite_id)
        .bind(lead_id)
        .bind(sent_at)
        .bind(channel)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Whether any invite exists for the lead. This is the
    /// `invite_sent` input to the signal evaluator.
    pub async fn exists_for_lead(pool: &PgPool, lead_id: &str) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_invites WHERE lead_id = $1")
            .bind(lead_id)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// All invites for a lead, newest first.
    pub async fn list_by_lead(
        pool: &PgPool,
        lead_id: &str,
    ) -> Result<Vec<CourseInvite>, sqlx::Error> {
        let query = format!(
            "SELECT {COURSE_INVITE_COLUMNS} FROM course_invites \
             WHERE lead_id = $1 ORDER BY sent_at DESC"
        );
        sqlx::query_as::<_, CourseInvite>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }
}
