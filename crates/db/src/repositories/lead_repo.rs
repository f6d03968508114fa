//! Repository for the `leads` table.

use sqlx::PgPool;

use nurture_core::types::Timestamp;

use crate::models::lead::{Lead, LeadOverviewRow, UpsertLead};

/// Column list for `leads` queries.
const LEAD_COLUMNS: &str = "id, name, email, phone, created_at, updated_at";

/// Hard cap on overview page size.
pub const OVERVIEW_MAX_LIMIT: i64 = 1000;

/// Read/write operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead or update an existing one.
    ///
    /// On update only supplied fields overwrite existing values
    /// (`COALESCE` keeps the stored value when the DTO field is
    /// `None`); `created_at` is never touched and `updated_at` is
    /// always refreshed. `now` is injected by the caller.
    pub async fn upsert(
        pool: &PgPool,
        lead_id: &str,
        input: &UpsertLead,
        now: Timestamp,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (id, name, email, phone, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             ON CONFLICT (id) DO UPDATE SET \
                name = COALESCE($2, leads.name), \
                email = COALESCE($3, leads.email), \
                phone = COALESCE($4, leads.phone), \
                updated_at = $5 \
             RETURNING {LEAD_COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(lead_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by id.
    pub async fn find_by_id(pool: &PgPool, lead_id: &str) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(lead_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a lead exists.
    pub async fn exists(pool: &PgPool, lead_id: &str) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM leads WHERE id = $1")
            .bind(lead_id)
            .fetch_optional(pool)
            .await?;
        Ok(found.is_some())
    }

    /// Overview listing: every lead joined with its latest invite and
    /// cached course state, ordered most-recently-active first (nulls
    /// last), then lead id for a stable total order.
    ///
    /// `hot_completion_threshold` and `hot_activity_cutoff` come from
    /// the same thresholds the signal evaluator uses; the caller
    /// derives the cutoff from its injected `now`. The flag is a
    /// storage-side convenience for list views, not a persisted signal.
    pub async fn overview(
        pool: &PgPool,
        hot_completion_threshold: f64,
        hot_activity_cutoff: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LeadOverviewRow>, sqlx::Error> {
        let capped = limit.min(OVERVIEW_MAX_LIMIT);
        sqlx::query_as::<_, LeadOverviewRow>(
            "SELECT \
                l.id AS lead_id, \
                l.name, \
                l.email, \
                l.phone, \
                ci.sent_at AS invite_sent_at, \
                cs.completion_pct, \
                cs.current_section, \
                cs.last_activity_at, \
                COALESCE( \
                    ci.sent_at IS NOT NULL \
                    AND cs.completion_pct >= $1 \
                    AND cs.last_activity_at >= $2, \
                    FALSE \
                ) AS is_hot \
             FROM leads l \
             LEFT JOIN ( \
                 SELECT lead_id, MAX(sent_at) AS sent_at \
                 FROM course_invites \
                 GROUP BY lead_id \
             ) ci ON ci.lead_id = l.id \
             LEFT JOIN course_state cs ON cs.lead_id = l.id \
             ORDER BY cs.last_activity_at DESC NULLS LAST, l.id ASC \
             LIMIT $3 OFFSET $4",
        )
        .bind(hot_completion_threshold)
        .bind(hot_activity_cutoff)
        .bind(capped)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
