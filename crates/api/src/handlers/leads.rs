//! Handlers for lead upsert, the overview listing, status reads, and
//! the next-action recommendation.
//!
//! Every handler that evaluates the hot-lead signal accepts an optional
//! `now` query parameter so callers (and tests) can pin the evaluation
//! time; when absent, the wall clock is read once here at the HTTP
//! boundary and injected downward. Nothing below this layer consults
//! the clock.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};

use nurture_core::course::TOTAL_SECTIONS;
use nurture_core::decision::{decide_next_action, NextAction};
use nurture_core::error::CoreError;
use nurture_core::projection::{project_course_state, CourseState, ProgressFact};
use nurture_core::signal::{evaluate_hot_lead_signal, HotLeadSignal, SignalInputs};
use nurture_core::time::parse_utc_timestamp;
use nurture_core::types::Timestamp;
use nurture_db::models::course_invite::CreateCourseInvite;
use nurture_db::models::lead::{Lead, UpsertLead};
use nurture_db::repositories::{CourseInviteRepo, CourseStateRepo, LeadRepo, ProgressEventRepo};
use nurture_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, WriteOutcome};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Optional evaluation-time override shared by signal-reading endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct AsOfParams {
    pub now: Option<String>,
}

/// Query parameters for the overview listing.
#[derive(Debug, serde::Deserialize)]
pub struct OverviewParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub now: Option<String>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Full status view of one lead: entity, invite flag, projected course
/// state, and the signal evaluated at the requested time.
#[derive(Debug, serde::Serialize)]
pub struct LeadStatus {
    pub lead: Lead,
    pub invite_sent: bool,
    pub course_state: CourseState,
    pub signal: HotLeadSignal,
}

/// The recommended next touch for a lead, with the signal that drove it.
#[derive(Debug, serde::Serialize)]
pub struct NextActionView {
    pub lead_id: String,
    pub action: NextAction,
    pub signal: HotLeadSignal,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Resolve the evaluation time: parse the caller's `now` when supplied,
/// otherwise read the wall clock. This is the only place the API layer
/// invents a timestamp.
pub(crate) fn resolve_now(raw: Option<&str>) -> AppResult<Timestamp> {
    match raw {
        Some(value) => Ok(parse_utc_timestamp("now", value)?),
        None => Ok(Utc::now()),
    }
}

/// 404 unless the lead exists.
pub(crate) async fn require_lead(pool: &DbPool, lead_id: &str) -> AppResult<()> {
    if LeadRepo::exists(pool, lead_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Lead",
            id: lead_id.to_string(),
        }))
    }
}

/// Project a lead's course state from the full ledger.
pub(crate) async fn project_from_ledger(pool: &DbPool, lead_id: &str) -> AppResult<CourseState> {
    let events = ProgressEventRepo::list_by_lead(pool, lead_id).await?;
    let facts: Vec<ProgressFact> = events
        .into_iter()
        .map(|e| ProgressFact {
            event_id: e.id,
            section_id: e.section_id,
            occurred_at: e.occurred_at,
        })
        .collect();
    Ok(project_course_state(&facts, TOTAL_SECTIONS)?)
}

/// Load everything the signal evaluator needs for one lead.
pub(crate) async fn load_signal_inputs(
    pool: &DbPool,
    lead_id: &str,
) -> AppResult<(bool, CourseState)> {
    let invite_sent = CourseInviteRepo::exists_for_lead(pool, lead_id).await?;
    let course_state = project_from_ledger(pool, lead_id).await?;
    Ok((invite_sent, course_state))
}

// ---------------------------------------------------------------------------
// Lead CRUD
// ---------------------------------------------------------------------------

/// PUT /leads/{lead_id}
///
/// Insert or patch a lead. Omitted fields never overwrite stored values.
pub async fn upsert_lead(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(input): Json<UpsertLead>,
) -> AppResult<impl IntoResponse> {
    if lead_id.trim().is_empty() {
        return Err(AppError::BadRequest("lead_id must not be empty".to_string()));
    }

    let lead = LeadRepo::upsert(&state.pool, &lead_id, &input, Utc::now()).await?;

    tracing::info!(lead_id = %lead.id, "Lead upserted");

    Ok(Json(DataResponse { data: lead }))
}

/// GET /leads
///
/// Overview listing with a storage-side hot flag, most recently active
/// first.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<impl IntoResponse> {
    let now = resolve_now(params.now.as_deref())?;
    let limit = params.limit.unwrap_or(100);
    let offset = params.offset.unwrap_or(0);

    if limit < 1 {
        return Err(AppError::BadRequest("limit must be at least 1".to_string()));
    }
    if offset < 0 {
        return Err(AppError::BadRequest("offset must not be negative".to_string()));
    }

    // The flag in the listing uses the same thresholds as the evaluator;
    // the recency window becomes an absolute cutoff here.
    let cutoff = now - Duration::days(state.thresholds.activity_window_days);
    let rows = LeadRepo::overview(
        &state.pool,
        state.thresholds.completion_threshold_pct,
        cutoff,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Status and next action
// ---------------------------------------------------------------------------

/// GET /leads/{lead_id}/status
///
/// Project the lead's course state from the ledger and evaluate the
/// hot-lead signal at the requested time.
pub async fn get_lead_status(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Query(params): Query<AsOfParams>,
) -> AppResult<impl IntoResponse> {
    let now = resolve_now(params.now.as_deref())?;

    let lead = LeadRepo::find_by_id(&state.pool, &lead_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Lead",
                id: lead_id.clone(),
            })
        })?;

    let (invite_sent, course_state) = load_signal_inputs(&state.pool, &lead_id).await?;
    let inputs = SignalInputs {
        invite_sent,
        completion_pct: course_state.completion_pct,
        last_activity_at: course_state.last_activity_at,
    };
    let signal = evaluate_hot_lead_signal(&inputs, &state.thresholds, now);

    Ok(Json(DataResponse {
        data: LeadStatus {
            lead,
            invite_sent,
            course_state,
            signal,
        },
    }))
}

/// GET /leads/{lead_id}/next-action
///
/// Collapse invite status, course state, and the signal into exactly
/// one recommended action.
pub async fn get_next_action(
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
    let action = decide_next_action(invite_sent, &course_state, &signal);

    tracing::debug!(lead_id = %lead_id, action = action.as_str(), "Next action decided");

    Ok(Json(DataResponse {
        data: NextActionView {
            lead_id,
            action,
            signal,
        },
    }))
}

// ---------------------------------------------------------------------------
// Invites
// ---------------------------------------------------------------------------

/// POST /leads/{lead_id}/invites
///
/// Record that the course invite went out. Duplicate invite ids are
/// absorbed as no-ops (`written = false`).
pub async fn create_invite(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(input): Json<CreateCourseInvite>,
) -> AppResult<impl IntoResponse> {
    if input.invite_id.trim().is_empty() {
        return Err(AppError::BadRequest("invite_id must not be empty".to_string()));
    }
    require_lead(&state.pool, &lead_id).await?;

    let sent_at = match &input.sent_at {
        Some(raw) => parse_utc_timestamp("sent_at", raw)?,
        None => Utc::now(),
    };

    let written = CourseInviteRepo::insert(
        &state.pool,
        &input.invite_id,
        &lead_id,
        sent_at,
        input.channel.as_deref(),
    )
    .await?;

    tracing::info!(
        lead_id = %lead_id,
        invite_id = %input.invite_id,
        written,
        "Course invite recorded"
    );

    Ok(Json(DataResponse {
        data: WriteOutcome { written },
    }))
}

/// GET /leads/{lead_id}/invites
///
/// All invites for a lead, newest first.
pub async fn list_invites(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_lead(&state.pool, &lead_id).await?;
    let invites = CourseInviteRepo::list_by_lead(&state.pool, &lead_id).await?;
    Ok(Json(DataResponse { data: invites }))
}

// ---------------------------------------------------------------------------
// Course state cache
// ---------------------------------------------------------------------------

/// POST /leads/{lead_id}/course-state/recompute
///
/// Rebuild the cached course-state snapshot from the ledger. The cache
/// is advisory; reads always reproject, so this exists for list views
/// and external consumers of the table.
pub async fn recompute_course_state(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_lead(&state.pool, &lead_id).await?;

    let course_state = project_from_ledger(&state.pool, &lead_id).await?;
    let row = CourseStateRepo::upsert(&state.pool, &lead_id, &course_state, Utc::now()).await?;

    tracing::info!(
        lead_id = %lead_id,
        completion_pct = ?row.completion_pct,
        "Course state recomputed"
    );

    Ok(Json(DataResponse { data: row }))
}
