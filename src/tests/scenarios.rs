//! End-to-end pipeline scenarios over the English pack.
//!
//! Reference instant throughout: Thursday 2025-09-11 10:00, Monday-start
//! calendar, default preferences.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::{
    parse, DateParts, EnglishPack, FallbackRecognizer, ParseOutcome, Preferences, RecognizedSpan,
    Span, TemporalParser, TokenKind, WeekRef, WeekdayModifier,
};

static PACK: Lazy<EnglishPack> = Lazy::new(|| EnglishPack::new().expect("pack compiles"));

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 9, 11)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn run(text: &str) -> ParseOutcome {
    parse(text, reference(), &*PACK, &Preferences::default())
}

#[test]
fn next_week_at_eleven_is_an_instant() {
    let outcome = run("next week at 11:00");

    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::RelativeWeek {
            week: WeekRef::NextWeek(1),
        }));
    assert!(outcome
        .tokens
        .iter()
        .any(|t| matches!(t.kind, TokenKind::AbsoluteTime { .. })));

    assert!(!outcome.context.is_range_query);
    assert_eq!(outcome.context.instant.to_string(), "2025-09-18 11:00:00");
}

#[test]
fn next_friday_from_thursday_skips_tomorrow() {
    let outcome = run("move game to next Friday");

    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::Weekday {
            index: 6,
            modifier: Some(WeekdayModifier::Next),
        }));
    // nine days out, at the reference's own time of day
    assert_eq!(outcome.context.instant.to_string(), "2025-09-19 10:00:00");
    assert!(!outcome.context.is_range_query);
}

#[test]
fn conflicting_times_keep_the_rightmost() {
    let outcome = run("dinner with parents tonight 8pm at 7pm");

    let times: Vec<_> = outcome
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::AbsoluteTime { .. }))
        .collect();
    assert_eq!(times.len(), 2, "both explicit times survive selection");

    assert_eq!(outcome.context.instant.to_string(), "2025-09-11 19:00:00");
    assert!(!outcome.context.conflicts.is_empty());
    assert!(outcome.context.confidence < 1.0);
}

#[test]
fn next_thursday_morning_is_a_window() {
    let outcome = run("show agenda for next Thursday morning");

    assert!(outcome.context.is_range_query);
    let range = outcome.context.range.expect("morning window");
    insta::assert_display_snapshot!(range, @"2025-09-18 06:00:00 .. 2025-09-18 11:59:59");
}

#[test]
fn empty_input_echoes_the_reference() {
    let outcome = run("");

    assert!(outcome.tokens.is_empty());
    assert_eq!(outcome.context.instant, reference());
    assert_eq!(outcome.context.confidence, 0.0);
    assert!(outcome.context.conflicts.is_empty());
}

#[test]
fn bare_weekend_is_the_coming_saturday_and_sunday() {
    let outcome = run("push back do laundry to weekend");

    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::Weekend {
            week: Some(WeekRef::ThisWeek),
        }));
    assert!(outcome.context.is_range_query);
    let range = outcome.context.range.expect("weekend window");
    insta::assert_display_snapshot!(range, @"2025-09-13 00:00:00 .. 2025-09-14 23:59:59");
}

/// A canned host recognizer: always claims the same span for the same
/// text, which is what lets the pipeline stay deterministic under test.
struct MarchFifth;

impl FallbackRecognizer for MarchFifth {
    fn recognize(&self, text: &str) -> Vec<RecognizedSpan> {
        text.find("March 5")
            .map(|at| {
                vec![RecognizedSpan::new(
                    Span::new(at, "March 5".len()),
                    DateParts {
                        year: 2026,
                        month: 3,
                        day: 5,
                        hour: None,
                        minute: None,
                    },
                )]
            })
            .unwrap_or_default()
    }
}

#[test]
fn host_recognizer_supplies_absolute_dates() {
    let outcome = TemporalParser::new(&*PACK)
        .with_fallback(&MarchFifth)
        .parse("book flights for March 5 at 7am", reference());

    assert!(outcome
        .tokens
        .iter()
        .any(|t| matches!(t.kind, TokenKind::AbsoluteDate { .. })));
    assert_eq!(outcome.context.instant.to_string(), "2026-03-05 07:00:00");
    assert!(!outcome.context.is_range_query);
}
