//! Portuguese and Spanish coverage through the full pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::{
    parse, ParseOutcome, PortuguesePack, Preferences, SpanishPack, TokenKind, WeekRef,
    WeekdayModifier,
};

static PT: Lazy<PortuguesePack> = Lazy::new(|| PortuguesePack::new().expect("pack compiles"));
static ES: Lazy<SpanishPack> = Lazy::new(|| SpanishPack::new().expect("pack compiles"));

fn reference() -> NaiveDateTime {
    // Thursday
    NaiveDate::from_ymd_opt(2025, 9, 11)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn run_pt(text: &str) -> ParseOutcome {
    parse(text, reference(), &*PT, &Preferences::default())
}

fn run_es(text: &str) -> ParseOutcome {
    parse(text, reference(), &*ES, &Preferences::default())
}

#[test]
fn portuguese_tomorrow_with_unit_marker_time() {
    let outcome = run_pt("jantar amanhã às 20h");
    assert_eq!(outcome.context.instant.to_string(), "2025-09-12 20:00:00");
    assert!(!outcome.context.is_range_query);
}

#[test]
fn portuguese_weekday_with_postfix_next() {
    let outcome = run_pt("reunião sexta que vem às 9 da manhã");
    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::Weekday {
            index: 6,
            modifier: Some(WeekdayModifier::Next),
        }));
    assert_eq!(outcome.context.instant.to_string(), "2025-09-19 09:00:00");
}

#[test]
fn portuguese_week_that_comes() {
    let outcome = run_pt("semana que vem");
    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::RelativeWeek {
            week: WeekRef::NextWeek(1),
        }));
    assert!(outcome.context.is_range_query);
}

#[test]
fn portuguese_weekend_and_ordinal() {
    let outcome = run_pt("fim de semana");
    assert_eq!(outcome.context.instant.date().to_string(), "2025-09-13");
    assert!(outcome.context.is_range_query);

    let outcome = run_pt("marcar dentista no dia 24");
    assert!(outcome
        .tokens
        .iter()
        .any(|t| t.kind == TokenKind::OrdinalDay { day: 24 }));
    assert_eq!(outcome.context.instant.date().to_string(), "2025-09-24");
}

#[test]
fn portuguese_noon_word_is_a_time_not_a_daypart() {
    let outcome = run_pt("almoço ao meio-dia");
    assert!(!outcome.context.is_range_query);
    assert_eq!(outcome.context.instant.time().to_string(), "12:00:00");
}

#[test]
fn portuguese_duration_from_now() {
    let outcome = run_pt("daqui a 2 horas");
    assert_eq!(outcome.context.instant.to_string(), "2025-09-11 12:00:00");
    assert!(outcome.context.confidence < 1.0);
}

#[test]
fn spanish_weekday_with_article_and_time() {
    let outcome = run_es("nos vemos el martes que viene a las 3 de la tarde");
    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::Weekday {
            index: 3,
            modifier: Some(WeekdayModifier::Next),
        }));
    assert_eq!(outcome.context.instant.to_string(), "2025-09-16 15:00:00");
}

#[test]
fn spanish_week_that_comes() {
    let outcome = run_es("la semana que viene");
    assert!(outcome.tokens.iter().any(|t| t.kind
        == TokenKind::RelativeWeek {
            week: WeekRef::NextWeek(1),
        }));
    let range = outcome.context.range.expect("week window");
    assert_eq!(range.start.date().to_string(), "2025-09-15");
    assert_eq!(range.end.date().to_string(), "2025-09-21");
}

#[test]
fn spanish_manana_is_tomorrow_but_por_la_manana_is_a_daypart() {
    let outcome = run_es("te llamo mañana");
    assert_eq!(outcome.context.instant.date().to_string(), "2025-09-12");

    let outcome = run_es("el lunes por la mañana");
    assert!(outcome
        .tokens
        .iter()
        .all(|t| !matches!(t.kind, TokenKind::RelativeDay { .. })));
    // Monday is in the past this week, so the bare weekday rolls forward
    assert_eq!(outcome.context.instant.date().to_string(), "2025-09-15");
    assert!(outcome.context.is_range_query);
    let range = outcome.context.range.expect("morning window");
    assert_eq!(range.start.time().to_string(), "06:00:00");
}

#[test]
fn spanish_between_range_crossing_noon() {
    let outcome = run_es("libre entre las 11 y la 1 de la tarde");
    let range_token = outcome
        .tokens
        .iter()
        .find_map(|t| match t.kind {
            TokenKind::TimeRange { start, end } => Some((start, end)),
            _ => None,
        })
        .expect("time range token");
    assert_eq!(range_token.0.hour, 11);
    assert_eq!(range_token.1.hour, 13);
    assert_eq!(outcome.context.duration, Some(chrono::Duration::hours(2)));
}

#[test]
fn spanish_pasado_manana_is_consumed_without_a_token() {
    let outcome = run_es("pasado mañana");
    assert!(outcome
        .tokens
        .iter()
        .all(|t| !matches!(t.kind, TokenKind::RelativeDay { .. })));
}
