//! Handler for recording progress events into the append-only ledger.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use nurture_core::course::validate_section_id;
use nurture_core::time::parse_utc_timestamp;
use nurture_db::models::progress_event::RecordProgressEvent;
use nurture_db::repositories::ProgressEventRepo;

use crate::error::AppResult;
use crate::handlers::leads::require_lead;
use crate::response::{DataResponse, WriteOutcome};
use crate::state::AppState;

/// POST /progress-events
///
/// Append one progress event. `event_id` is the idempotency key: a
/// replay (same id, any payload) is absorbed as a no-op and reported
/// as `written = false`. Validation runs before the lead lookup so an
/// unknown section is always a 400, never a 404.
pub async fn record_progress_event(
    State(state): State<AppState>,
    Json(input): Json<RecordProgressEvent>,
) -> AppResult<impl IntoResponse> {
    validate_section_id(&input.section_id)?;
    let occurred_at = parse_utc_timestamp("occurred_at", &input.occurred_at)?;

    require_lead(&state.pool, &input.lead_id).await?;

    let written = ProgressEventRepo::insert(
        &state.pool,
        &input.event_id,
        &input.lead_id,
        &input.section_id,
        occurred_at,
    )
    .await?;

    tracing::info!(
        lead_id = %input.lead_id,
        event_id = %input.event_id,
        section_id = %input.section_id,
        written,
        "Progress event recorded"
    );

    Ok(Json(DataResponse {
        data: WriteOutcome { written },
    }))
}
