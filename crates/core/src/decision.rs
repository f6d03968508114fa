//! Next-action decision function.
//!
//! Collapses invite status, course state, and the hot-lead signal into
//! exactly one recommended action. The priority table is evaluated top
//! to bottom and the first match wins, so the result is a total
//! function of its inputs: no two actions can ever both apply.

use serde::Serialize;

use crate::projection::CourseState;
use crate::signal::HotLeadSignal;

/// The single recommended next touch for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextAction {
    EscalateHotLead,
    SendInvite,
    FollowUpReminder,
    FollowUpOnProgress,
    NoAction,
}

impl NextAction {
    /// Wire/string form of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EscalateHotLead => "ESCALATE_HOT_LEAD",
            Self::SendInvite => "SEND_INVITE",
            Self::FollowUpReminder => "FOLLOW_UP_REMINDER",
            Self::FollowUpOnProgress => "FOLLOW_UP_ON_PROGRESS",
            Self::NoAction => "NO_ACTION",
        }
    }
}

/// Decide the next action for a lead. Priority order, first match wins:
///
/// 1. hot lead -> escalate
/// 2. never invited -> send the invite
/// 3. invited but never engaged (no or zero completion) -> reminder
/// 4. invited, partial progress, not hot -> follow up on progress
/// 5. completed but past the recency window -> still follow up
/// 6. otherwise -> nothing to do
pub fn decide_next_action(
    invite_sent: bool,
    course_state: &CourseState,
    signal: &HotLeadSignal,
) -> NextAction {
    if signal.hot {
        return NextAction::EscalateHotLead;
    }

    if !invite_sent {
        return NextAction::SendInvite;
    }

    match course_state.completion_pct {
        None => NextAction::FollowUpReminder,
        Some(pct) if pct == 0.0 => NextAction::FollowUpReminder,
        Some(pct) if pct > 0.0 && pct < 100.0 => NextAction::FollowUpOnProgress,
        Some(pct) if pct == 100.0 => NextAction::FollowUpOnProgress,
        Some(_) => NextAction::NoAction,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::signal::{
        evaluate_hot_lead_signal, SignalInputs, SignalThresholds, REASON_HOT_ENGAGED,
        REASON_NOT_INVITED,
    };

    fn state(completion_pct: Option<f64>) -> CourseState {
        CourseState {
            completion_pct,
            last_activity_at: None,
            current_section: None,
        }
    }

    fn not_hot() -> HotLeadSignal {
        HotLeadSignal {
            hot: false,
            reasons: vec![REASON_NOT_INVITED],
            evaluated_at: "2026-02-01T12:00:00.000000Z".to_string(),
        }
    }

    fn hot() -> HotLeadSignal {
        HotLeadSignal {
            hot: true,
            reasons: vec![REASON_HOT_ENGAGED],
            evaluated_at: "2026-02-01T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn hot_lead_escalates_above_everything() {
        assert_eq!(
            decide_next_action(true, &state(Some(33.33)), &hot()),
            NextAction::EscalateHotLead
        );
    }

    #[test]
    fn uninvited_lead_gets_invite() {
        assert_eq!(
            decide_next_action(false, &state(None), &not_hot()),
            NextAction::SendInvite
        );
        // Even with recorded progress, no invite means send one.
        assert_eq!(
            decide_next_action(false, &state(Some(50.0)), &not_hot()),
            NextAction::SendInvite
        );
    }

    #[test]
    fn invited_but_never_engaged_gets_reminder() {
        assert_eq!(
            decide_next_action(true, &state(None), &not_hot()),
            NextAction::FollowUpReminder
        );
        assert_eq!(
            decide_next_action(true, &state(Some(0.0)), &not_hot()),
            NextAction::FollowUpReminder
        );
    }

    #[test]
    fn partial_progress_gets_progress_follow_up() {
        assert_eq!(
            decide_next_action(true, &state(Some(11.11)), &not_hot()),
            NextAction::FollowUpOnProgress
        );
        assert_eq!(
            decide_next_action(true, &state(Some(99.99)), &not_hot()),
            NextAction::FollowUpOnProgress
        );
    }

    #[test]
    fn completed_but_stale_still_gets_follow_up() {
        assert_eq!(
            decide_next_action(true, &state(Some(100.0)), &not_hot()),
            NextAction::FollowUpOnProgress
        );
    }

    #[test]
    fn out_of_range_completion_falls_through_to_no_action() {
        assert_eq!(
            decide_next_action(true, &state(Some(123.0)), &not_hot()),
            NextAction::NoAction
        );
    }

    #[test]
    fn action_strings_match_wire_format() {
        assert_eq!(NextAction::EscalateHotLead.as_str(), "ESCALATE_HOT_LEAD");
        assert_eq!(NextAction::SendInvite.as_str(), "SEND_INVITE");
        assert_eq!(NextAction::FollowUpReminder.as_str(), "FOLLOW_UP_REMINDER");
        assert_eq!(
            NextAction::FollowUpOnProgress.as_str(),
            "FOLLOW_UP_ON_PROGRESS"
        );
        assert_eq!(NextAction::NoAction.as_str(), "NO_ACTION");
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&NextAction::EscalateHotLead).unwrap();
        assert_eq!(json, "\"ESCALATE_HOT_LEAD\"");
    }

    // -- end-to-end over evaluator + decision -----------------------------------

    #[test]
    fn engaged_lead_escalates() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let last = now - chrono::Duration::days(1);
        let cs = CourseState {
            completion_pct: Some(33.33),
            last_activity_at: Some(last),
            current_section: Some("P1_S3".to_string()),
        };
        let inputs = SignalInputs {
            invite_sent: true,
            completion_pct: cs.completion_pct,
            last_activity_at: cs.last_activity_at,
        };
        let signal = evaluate_hot_lead_signal(&inputs, &SignalThresholds::default(), now);
        assert!(signal.hot);
        assert_eq!(
            decide_next_action(true, &cs, &signal),
            NextAction::EscalateHotLead
        );
    }

    #[test]
    fn same_lead_ten_days_later_gets_progress_follow_up() {
        let now = Utc.with_ymd_and_hms(2026, 2, 11, 12, 0, 0).unwrap();
        let last = Utc.with_ymd_and_hms(2026, 1, 31, 12, 0, 0).unwrap();
        let cs = CourseState {
            completion_pct: Some(33.33),
            last_activity_at: Some(last),
            current_section: Some("P1_S3".to_string()),
        };
        let inputs = SignalInputs {
            invite_sent: true,
            completion_pct: cs.completion_pct,
            last_activity_at: cs.last_activity_at,
        };
        let signal = evaluate_hot_lead_signal(&inputs, &SignalThresholds::default(), now);
        assert_eq!(signal.reasons, vec!["ACTIVITY_STALE"]);
        assert_eq!(
            decide_next_action(true, &cs, &signal),
            NextAction::FollowUpOnProgress
        );
    }
}
