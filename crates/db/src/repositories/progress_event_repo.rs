//! Repository for the append-only `progress_events` ledger.

use sqlx::PgPool;

use nurture_core::types::Timestamp;

use crate::models::progress_event::ProgressEvent;

/// Column list for `progress_events` queries.
const PROGRESS_EVENT_COLUMNS: &str = "id, lead_id, section_id, occurred_at";

/// Write and read operations on the progress ledger. The ledger has no
/// update or delete path; corrections are modeled as new events.
pub struct ProgressEventRepo;

impl ProgressEventRepo {
    /// Insert a progress event, returning whether a row was written.
    ///
    /// Idempotency rides on the primary-key constraint: a duplicate
    /// `event_id` is absorbed by `ON CONFLICT DO NOTHING` and reported
    /// as `written = false`. This stays correct under concurrent
    /// writers, unlike a pre-check-then-insert sequence. Section
    /// vocabulary must be validated by the caller before reaching here.
    pub async fn insert(
        pool: &PgPool,
        event_id: &str,
        lead_id: &str,
        section_id: &str,
        occurred_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO progress_events (id, lead_id, section_id, occurred_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(event_id)
        .bind(lead_id)
        .bind(section_id)
        .bind(occurred_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// All events for a lead. Order is not significant to the
    /// projector; it recomputes from the full set.
    pub async fn list_by_lead(
        pool: &PgPool,
        lead_id: &str,
    ) -> Result<Vec<ProgressEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_EVENT_COLUMNS} FROM progress_events \
             WHERE lead_id = $1 ORDER BY occurred_at ASC, id ASC"
        );
        sqlx::query_as::<_, ProgressEvent>(&query)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }

    /// Total number of events for a lead (reattempts included).
    pub async fn count_by_lead(pool: &PgPool, lead_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM progress_events WHERE lead_id = $1")
            .bind(lead_id)
            .fetch_one(pool)
            .await
    }
}
