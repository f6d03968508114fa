//! Route definitions for leads: upsert, overview, status, next action,
//! invites, and the course-state cache.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes, mounted at `/leads`.
///
/// ```text
/// GET  /                                    -> list_leads
/// PUT  /{lead_id}                           -> upsert_lead
/// GET  /{lead_id}/status                    -> get_lead_status
/// GET  /{lead_id}/next-action               -> get_next_action
/// POST /{lead_id}/invites                   -> create_invite
/// GET  /{lead_id}/invites                   -> list_invites
/// POST /{lead_id}/course-state/recompute    -> recompute_course_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads))
        .route("/{lead_id}", put(leads::upsert_lead))
        .route("/{lead_id}/status", get(leads::get_lead_status))
        .route("/{lead_id}/next-action", get(leads::get_next_action))
        .route(
            "/{lead_id}/invites",
            post(leads::create_invite).get(leads::list_invites),
        )
        .route(
            "/{lead_id}/course-state/recompute",
            post(leads::recompute_course_state),
        )
}
