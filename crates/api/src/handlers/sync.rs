//! Handlers for the sync outbox.
//!
//! The outbox records that a hot lead needs (or received) a push to the
//! downstream CRM. No network calls happen here; an external worker
//! drains the rows. Transitions happen in place on the (lead,
//! destination) pair, so marking a record sent consumes the pending
//! NEEDS_SYNC row rather than appending history.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use nurture_core::error::CoreError;
use nurture_core::signal::{evaluate_hot_lead_signal, SignalInputs, REASON_HOT_ENGAGED};
use nurture_db::models::sync_record::{
    validate_sync_status, SyncRecord, DESTINATION_GHL, SYNC_STATUS_FAILED, SYNC_STATUS_NEEDS_SYNC,
    SYNC_STATUS_SENT,
};
use nurture_db::repositories::SyncRecordRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::leads::{load_signal_inputs, require_lead, resolve_now, AsOfParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / body / response types
// ---------------------------------------------------------------------------

/// Query parameters for listing outbox rows.
#[derive(Debug, serde::Deserialize)]
pub struct SyncListParams {
    pub status: Option<String>,
    pub lead_id: Option<String>,
    pub limit: Option<i64>,
}

/// Body for the mark-sent / mark-failed endpoints. All fields optional;
/// callers send `{}` when they have nothing to add.
#[derive(Debug, Default, serde::Deserialize)]
pub struct MarkSyncBody {
    pub reason: Option<String>,
}

/// Outcome of an outbox write attempt. `written` is false when the
/// signal was not hot; `reasons` then explains which gate failed.
#[derive(Debug, serde::Serialize)]
pub struct SyncWriteView {
    pub written: bool,
    pub reasons: Vec<&'static str>,
    pub record: Option<SyncRecord>,
}

/// Outcome of a status transition. `changed` is false when the record
/// was already in the target status (replayed acknowledgement).
#[derive(Debug, serde::Serialize)]
pub struct SyncTransitionView {
    pub changed: bool,
    pub record: SyncRecord,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /leads/{lead_id}/sync-records
///
/// Evaluate the hot-lead signal and, when hot, ensure a NEEDS_SYNC
/// outbox row exists for the lead. Not-hot leads get a reasoned
/// `written = false` instead of an error.
pub async fn write_sync_record(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Query(params): Query<AsOfParams>,
) -> AppResult<impl IntoResponse> {
    let now = resolve_now(params.now.as_deref())?;
    require_lead(&state.pool, &lead_id).await?;

    let (invite_sent, course_state) = load_signal_inputs(&state.pool, &lead_id).await?;
    let inputs = SignalInputs {
        invite_sent,
        completion_pct: course_state.completion_pct,
        last_activity_at: course_state.last_activity_at,
    };
    let signal = evaluate_hot_lead_signal(&inputs, &state.thresholds, now);

    if !signal.hot {
        tracing::info!(
            lead_id = %lead_id,
            reasons = ?signal.reasons,
            "Lead not hot; no sync record written"
        );
        return Ok(Json(DataResponse {
            data: SyncWriteView {
                written: false,
                reasons: signal.reasons,
                record: None,
            },
        }));
    }

    let record = SyncRecordRepo::upsert(
        &state.pool,
        &lead_id,
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        Some(REASON_HOT_ENGAGED),
        now,
    )
    .await?;

    tracing::info!(
        lead_id = %lead_id,
        record_id = record.id,
        "Hot lead queued for sync"
    );

    Ok(Json(DataResponse {
        data: SyncWriteView {
            written: true,
            reasons: signal.reasons,
            record: Some(record),
        },
    }))
}

/// POST /leads/{lead_id}/sync-records/sent
///
/// Acknowledge that the pending sync went out.
pub async fn mark_sync_sent(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let view = mark(&state, &lead_id, SYNC_STATUS_SENT, None).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /leads/{lead_id}/sync-records/failed
///
/// Record that the pending sync failed, with an optional reason.
pub async fn mark_sync_failed(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(body): Json<MarkSyncBody>,
) -> AppResult<impl IntoResponse> {
    let view = mark(&state, &lead_id, SYNC_STATUS_FAILED, body.reason.as_deref()).await?;
    Ok(Json(DataResponse { data: view }))
}

/// Shared transition logic. Ordered checks:
///
/// 1. unknown lead -> 404
/// 2. record already in the target status -> replay, `changed = false`
/// 3. pending NEEDS_SYNC row -> transition it in place
/// 4. nothing pending -> 409
async fn mark(
    state: &AppState,
    lead_id: &str,
    target: &'static str,
    reason: Option<&str>,
) -> AppResult<SyncTransitionView> {
    require_lead(&state.pool, lead_id).await?;

    if let Some(existing) =
        SyncRecordRepo::find_by_key(&state.pool, lead_id, DESTINATION_GHL, target).await?
    {
        return Ok(SyncTransitionView {
            changed: false,
            record: existing,
        });
    }

    let record = SyncRecordRepo::transition(
        &state.pool,
        lead_id,
        DESTINATION_GHL,
        SYNC_STATUS_NEEDS_SYNC,
        target,
        reason,
        Utc::now(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Lead {lead_id} has no {SYNC_STATUS_NEEDS_SYNC} record for {DESTINATION_GHL}"
        )))
    })?;

    tracing::info!(
        lead_id = %lead_id,
        record_id = record.id,
        status = target,
        "Sync record transitioned"
    );

    Ok(SyncTransitionView {
        changed: true,
        record,
    })
}

/// GET /sync-records
///
/// List outbox rows, newest-touched first, with optional status and
/// lead filters.
pub async fn list_sync_records(
    State(state): State<AppState>,
    Query(params): Query<SyncListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        validate_sync_status(status)?;
    }
    let limit = params.limit.unwrap_or(200);
    if limit < 1 {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }

    let records = SyncRecordRepo::list(
        &state.pool,
        params.status.as_deref(),
        params.lead_id.as_deref(),
        limit,
    )
    .await?;

    Ok(Json(DataResponse { data: records }))
}
