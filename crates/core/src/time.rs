//! Timestamp parsing for caller-supplied values.
//!
//! All timestamps in the pipeline are UTC. A value carrying an explicit
//! offset is converted; a timezone-naive value is accepted as UTC with a
//! logged advisory, never silently reinterpreted as local time and never
//! rejected. The core never invents a timestamp: `now` is always passed
//! in by the caller.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Parse a caller-supplied timestamp string into a UTC timestamp.
///
/// Accepts RFC 3339 (`2026-01-05T10:00:00Z`, `2026-01-05T10:00:00+02:00`)
/// directly. A timezone-naive value (`2026-01-05T10:00:00`) is treated as
/// UTC and flagged with a `tracing::warn!` advisory carrying the given
/// `field` name. Anything else is a validation error.
pub fn parse_utc_timestamp(field: &str, value: &str) -> Result<Timestamp, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        tracing::warn!(field, value, "timestamp has no timezone marker; assuming UTC");
        return Ok(naive.and_utc());
    }

    Err(CoreError::Validation(format!(
        "{field} is not a valid timestamp: '{value}'"
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn rfc3339_utc_parsed() {
        let ts = parse_utc_timestamp("occurred_at", "2026-01-05T10:00:00Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn offset_converted_to_utc() {
        let ts = parse_utc_timestamp("occurred_at", "2026-01-05T12:00:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn naive_accepted_as_utc() {
        let ts = parse_utc_timestamp("occurred_at", "2026-01-05T10:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn naive_with_fraction_accepted() {
        let ts = parse_utc_timestamp("occurred_at", "2026-01-05T10:00:00.250000").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn garbage_rejected() {
        assert_matches!(
            parse_utc_timestamp("occurred_at", "yesterday"),
            Err(CoreError::Validation(msg)) if msg.contains("occurred_at")
        );
    }

    #[test]
    fn date_only_rejected() {
        assert!(parse_utc_timestamp("occurred_at", "2026-01-05").is_err());
    }
}
