//! Route definitions for the progress-event ledger.

use axum::routing::post;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Ledger routes, mounted at `/progress-events`.
///
/// ```text
/// POST /    -> record_progress_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(progress::record_progress_event))
}
