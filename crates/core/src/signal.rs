//! Hot-lead signal evaluation.
//!
//! Three gates evaluated in a fixed order; evaluation stops at the
//! first failing gate and the result carries exactly one reason code.
//! The gate chain is data (an ordered list of predicate/reason pairs)
//! rather than nested conditionals so the order stays auditable and
//! each gate is independently testable.
//!
//! `now` is always injected by the caller. This module never consults
//! a wall clock.

use chrono::SecondsFormat;
use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Minimum completion percentage for the completion gate.
pub const COMPLETION_THRESHOLD_PCT: f64 = 25.0;

/// Maximum whole days since last activity for the recency gate.
/// A truncated delta of exactly 7 days passes; 8 fails.
pub const ACTIVITY_WINDOW_DAYS: i64 = 7;

/// Immutable threshold configuration for the evaluator.
///
/// Passed in rather than read from the constants inside the gate logic
/// so the rule set can be swapped without touching evaluation code.
#[derive(Debug, Clone, Copy)]
pub struct SignalThresholds {
    pub completion_threshold_pct: f64,
    pub activity_window_days: i64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            completion_threshold_pct: COMPLETION_THRESHOLD_PCT,
            activity_window_days: ACTIVITY_WINDOW_DAYS,
        }
    }
}

// ---------------------------------------------------------------------------
// Reason codes
// ---------------------------------------------------------------------------

pub const REASON_NOT_INVITED: &str = "NOT_INVITED";
pub const REASON_COMPLETION_UNKNOWN: &str = "COMPLETION_UNKNOWN";
pub const REASON_COMPLETION_BELOW_THRESHOLD: &str = "COMPLETION_BELOW_THRESHOLD";
pub const REASON_NO_ACTIVITY_RECORDED: &str = "NO_ACTIVITY_RECORDED";
pub const REASON_ACTIVITY_STALE: &str = "ACTIVITY_STALE";
pub const REASON_HOT_ENGAGED: &str = "HOT_ENGAGED";

// ---------------------------------------------------------------------------
// Inputs / output
// ---------------------------------------------------------------------------

/// Facts the evaluator needs, pre-loaded by the caller.
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs {
    /// True when a course invite record exists for the lead.
    pub invite_sent: bool,
    /// Course completion (0.0-100.0), `None` when no events exist.
    pub completion_pct: Option<f64>,
    /// Most recent progress event, `None` when no events exist.
    pub last_activity_at: Option<Timestamp>,
}

/// Result of one signal evaluation. Never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotLeadSignal {
    /// True only when every gate passes.
    pub hot: bool,
    /// Exactly one reason code.
    pub reasons: Vec<&'static str>,
    /// RFC 3339 rendering of the injected `now`.
    pub evaluated_at: String,
}

// ---------------------------------------------------------------------------
// Gates
// ---------------------------------------------------------------------------

/// A single pass/fail condition. Returns the failing reason code, or
/// `None` when the gate passes.
type Gate = fn(&SignalInputs, &SignalThresholds, Timestamp) -> Option<&'static str>;

fn invite_gate(inputs: &SignalInputs, _: &SignalThresholds, _: Timestamp) -> Option<&'static str> {
    if inputs.invite_sent {
        None
    } else {
        Some(REASON_NOT_INVITED)
    }
}

fn completion_gate(
    inputs: &SignalInputs,
    thresholds: &SignalThresholds,
    _: Timestamp,
) -> Option<&'static str> {
    match inputs.completion_pct {
        None => Some(REASON_COMPLETION_UNKNOWN),
        Some(pct) if pct < thresholds.completion_threshold_pct => {
            Some(REASON_COMPLETION_BELOW_THRESHOLD)
        }
        Some(_) => None,
    }
}

fn recency_gate(
    inputs: &SignalInputs,
    thresholds: &SignalThresholds,
    now: Timestamp,
) -> Option<&'static str> {
    match inputs.last_activity_at {
        None => Some(REASON_NO_ACTIVITY_RECORDED),
        // num_days truncates, so 7 days 23h counts as 7 and passes.
        Some(last) if (now - last).num_days() > thresholds.activity_window_days => {
            Some(REASON_ACTIVITY_STALE)
        }
        Some(_) => None,
    }
}

/// The ordered gate chain. Evaluation order is part of the contract:
/// the invite gate always wins over completion, completion over recency.
const GATES: &[Gate] = &[invite_gate, completion_gate, recency_gate];

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate the hot-lead signal for one lead at the injected `now`.
///
/// Gates run in order; the first failure short-circuits with its reason
/// code. All gates passing yields `hot = true` with `HOT_ENGAGED`.
pub fn evaluate_hot_lead_signal(
    inputs: &SignalInputs,
    thresholds: &SignalThresholds,
    now: Timestamp,
) -> HotLeadSignal {
    let evaluated_at = now.to_rfc3339_opts(SecondsFormat::Micros, true);

    for gate in GATES {
        if let Some(reason) = gate(inputs, thresholds, now) {
            return HotLeadSignal {
                hot: false,
                reasons: vec![reason],
                evaluated_at,
            };
        }
    }

    HotLeadSignal {
        hot: true,
        reasons: vec![REASON_HOT_ENGAGED],
        evaluated_at,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
