pub mod health;
pub mod leads;
pub mod progress;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /leads                                    overview listing (GET)
/// /leads/{lead_id}                          upsert (PUT)
/// /leads/{lead_id}/status                   projected state + signal (GET)
/// /leads/{lead_id}/next-action              decision function (GET)
/// /leads/{lead_id}/invites                  record invite (POST), list (GET)
/// /leads/{lead_id}/course-state/recompute   rebuild cache (POST)
/// /leads/{lead_id}/sync-records             queue hot lead (POST)
/// /leads/{lead_id}/sync-records/sent        acknowledge send (POST)
/// /leads/{lead_id}/sync-records/failed      record failure (POST)
///
/// /progress-events                          append to ledger (POST)
///
/// /sync-records                             list outbox (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/leads", leads::router().merge(sync::lead_sync_router()))
        .nest("/progress-events", progress::router())
        .nest("/sync-records", sync::outbox_router())
}
