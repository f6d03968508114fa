//! Route definitions for the sync outbox.
//!
//! Lead-scoped writes are merged into the `/leads` router; the listing
//! lives at top-level `/sync-records`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Lead-scoped outbox routes.
///
/// Merged into the existing `/leads` router.
///
/// ```text
/// POST /{lead_id}/sync-records          -> write_sync_record
/// POST /{lead_id}/sync-records/sent     -> mark_sync_sent
/// POST /{lead_id}/sync-records/failed   -> mark_sync_failed
/// ```
pub fn lead_sync_router() -> Router<AppState> {
    Router::new()
        .route("/{lead_id}/sync-records", post(sync::write_sync_record))
        .route("/{lead_id}/sync-records/sent", post(sync::mark_sync_sent))
        .route(
            "/{lead_id}/sync-records/failed",
            post(sync::mark_sync_failed),
        )
}

/// Outbox listing routes.
///
/// Mounted at `/sync-records`.
///
/// ```text
/// GET /    -> list_sync_records
/// ```
pub fn outbox_router() -> Router<AppState> {
    Router::new().route("/", get(sync::list_sync_records))
}
