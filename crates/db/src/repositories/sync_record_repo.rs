//! Repository for the `sync_records` outbox table.

use sqlx::PgPool;

use nurture_core::types::Timestamp;

use crate::models::sync_record::SyncRecord;

/// Column list for `sync_records` queries.
const SYNC_RECORD_COLUMNS: &str =
    "id, lead_id, destination, status, reason, created_at, updated_at";

/// Read/write operations on the outbox. Rows are keyed logically by
/// (lead, destination, status); the unique constraint makes the
/// NEEDS_SYNC upsert idempotent under concurrent writers.
pub struct SyncRecordRepo;

impl SyncRecordRepo {
    /// Ensure a row exists for (lead, destination, status); a repeat
    /// call refreshes `updated_at` in place rather than inserting a
    /// duplicate.
    pub async fn upsert(
        pool: &PgPool,
        lead_id: &str,
        destination: &str,
        status: &str,
        reason: Option<&str>,
        now: Timestamp,
    ) -> Result<SyncRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO sync_records \
                (lead_id, destination, status, reason, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             ON CONFLICT ON CONSTRAINT uq_sync_records_lead_destination_status \
             DO UPDATE SET updated_at = $5 \
             RETURNING {SYNC_RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(lead_id)
            .bind(destination)
            .bind(status)
            .bind(reason)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find the row for (lead, destination, status), if present.
    pub async fn find_by_key(
        pool: &PgPool,
        lead_id: &str,
        destination: &str,
        status: &str,
    ) -> Result<Option<SyncRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {SYNC_RECORD_COLUMNS} FROM sync_records \
             WHERE lead_id = $1 AND destination = $2 AND status = $3"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(lead_id)
            .bind(destination)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Transition the (lead, destination, `from`) row to `to` in place,
    /// returning the updated row. `None` when no `from` row exists.
    ///
    /// The caller must rule out an existing `to` row first (the unique
    /// constraint would reject the update); see the handler's ordered
    /// checks.
    pub async fn transition(
        pool: &PgPool,
        lead_id: &str,
        destination: &str,
        from: &str,
        to: &str,
        reason: Option<&str>,
        now: Timestamp,
    ) -> Result<Option<SyncRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE sync_records \
             SET status = $4, reason = COALESCE($5, reason), updated_at = $6 \
             WHERE lead_id = $1 AND destination = $2 AND status = $3 \
             RETURNING {SYNC_RECORD_COLUMNS}"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(lead_id)
            .bind(destination)
            .bind(from)
            .bind(to)
            .bind(reason)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// List outbox rows newest-touched first, with optional status and
    /// lead filters.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        lead_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SyncRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {SYNC_RECORD_COLUMNS} FROM sync_records \
             WHERE ($1::text IS NULL OR status = $1) \
               AND ($2::text IS NULL OR lead_id = $2) \
             ORDER BY updated_at DESC \
             LIMIT $3"
        );
        sqlx::query_as::<_, SyncRecord>(&query)
            .bind(status)
            .bind(lead_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
