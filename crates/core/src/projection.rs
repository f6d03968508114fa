//! Course-state projection.
//!
//! Aggregates a lead's recorded progress events into a single derived
//! snapshot. Pure: the caller loads the events, this module does the
//! math. Recomputing from the same event set always yields the
//! identical snapshot, so the stored `course_state` row is advisory
//! only and can be rebuilt at any time.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

/// One progress fact as loaded from the ledger. Field order mirrors the
/// `progress_events` row.
#[derive(Debug, Clone)]
pub struct ProgressFact {
    pub event_id: EntityId,
    pub section_id: EntityId,
    pub occurred_at: Timestamp,
}

/// Derived snapshot of a lead's course engagement.
///
/// All three fields are `None` when the lead has no events at all.
/// `completion_pct` being `None` (rather than `0.0`) is load-bearing:
/// the signal evaluator distinguishes "never engaged" from "engaged at
/// zero percent".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseState {
    pub completion_pct: Option<f64>,
    pub last_activity_at: Option<Timestamp>,
    pub current_section: Option<String>,
}

impl CourseState {
    /// Snapshot for a lead with no recorded events.
    pub fn empty() -> Self {
        Self {
            completion_pct: None,
            last_activity_at: None,
            current_section: None,
        }
    }
}

/// Round to 2 decimal places, half away from zero.
fn round_pct(pct: f64) -> f64 {
    (pct * 100.0).round() / 100.0
}

/// Project a lead's event history into a [`CourseState`] snapshot.
///
/// - `completion_pct`: distinct `section_id` count / `total_sections`
///   x 100, rounded to 2 decimals. Reattempts of the same section count
///   once.
/// - `last_activity_at`: maximum `occurred_at`.
/// - `current_section`: section of the latest event; when several events
///   share the latest timestamp the lexically greatest `event_id` wins,
///   since ledger insertion order is not guaranteed to be preserved.
///
/// `total_sections` must be >= 1 (9 for the reference course).
pub fn project_course_state(
    events: &[ProgressFact],
    total_sections: i32,
) -> Result<CourseState, CoreError> {
    if total_sections < 1 {
        return Err(CoreError::Validation(format!(
            "total_sections must be >= 1, got {total_sections}"
        )));
    }

    if events.is_empty() {
        return Ok(CourseState::empty());
    }

    let distinct: BTreeSet<&str> = events.iter().map(|e| e.section_id.as_str()).collect();
    let completion_pct = round_pct(distinct.len() as f64 / total_sections as f64 * 100.0);

    let latest = events
        .iter()
        .max_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then_with(|| a.event_id.cmp(&b.event_id))
        })
        .expect("non-empty event slice has a maximum");

    Ok(CourseState {
        completion_pct: Some(completion_pct),
        last_activity_at: Some(latest.occurred_at),
        current_section: Some(latest.section_id.clone()),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
