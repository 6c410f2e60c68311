//! The interpreter's output: a resolved instant plus the structure
//! around it.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::token::TemporalToken;

/// A closed interval of naive datetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Everything the interpreter concluded about one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalContext {
    /// The single best instant. Falls back to the reference time when
    /// nothing temporal was found.
    pub instant: NaiveDateTime,
    /// Length of an explicit time range, when one was given.
    pub duration: Option<Duration>,
    /// A day- or window-level interval, for phrases that denote a span
    /// rather than a point ("next week", "this morning").
    pub range: Option<DateInterval>,
    /// 0.0 (nothing temporal) to 1.0 (unambiguous).
    pub confidence: f64,
    /// Human-readable notes about contradictory inputs.
    pub conflicts: Vec<String>,
    /// True when the utterance asks about a span of days rather than a
    /// moment.
    pub is_range_query: bool,
    /// The selected tokens the conclusion was drawn from.
    pub tokens: Vec<TemporalToken>,
}

impl TemporalContext {
    /// A context that says "nothing temporal here".
    pub fn empty(reference: NaiveDateTime) -> Self {
        Self {
            instant: reference,
            duration: None,
            range: None,
            confidence: 0.0,
            conflicts: Vec::new(),
            is_range_query: false,
            tokens: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn interval_display() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let interval = DateInterval::new(start, start + Duration::hours(2));
        assert_eq!(
            interval.to_string(),
            "2025-09-12 09:00:00 .. 2025-09-12 11:00:00"
        );
    }

    #[test]
    fn empty_context_echoes_reference() {
        let reference = NaiveDate::from_ymd_opt(2025, 9, 11)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let ctx = TemporalContext::empty(reference);
        assert_eq!(ctx.instant, reference);
        assert_eq!(ctx.confidence, 0.0);
        assert!(!ctx.is_range_query);
    }
}
