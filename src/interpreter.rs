//! Token-to-date resolution.
//!
//! The interpreter groups the surviving tokens by kind and applies an
//! ordered algorithm: each step only fires when no stronger group has
//! already fixed that dimension (time-of-day or calendar date). The
//! output always exists; missing information degrades confidence, never
//! errors.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday as ChronoWeekday};
use tracing::{debug, trace};

use crate::clock::ClockTime;
use crate::context::{DateInterval, TemporalContext};
use crate::preferences::Preferences;
use crate::token::{
    DurationUnit, PartOfDay, RelativeDay, TemporalToken, TokenKind, WeekRef, WeekdayModifier,
};

/// Resolve a deduplicated token list against a reference instant.
pub fn interpret(
    tokens: Vec<TemporalToken>,
    reference: NaiveDateTime,
    prefs: &Preferences,
) -> TemporalContext {
    if tokens
        .iter()
        .all(|t| matches!(t.kind, TokenKind::Connector))
    {
        // Connectors alone carry no temporal meaning.
        let mut ctx = TemporalContext::empty(reference);
        ctx.tokens = tokens;
        return ctx;
    }

    let groups = Groups::collect(&tokens);
    let mut conflicts = Vec::new();

    // Time-of-day dimension.
    let mut time: Option<ClockTime> = None;
    let mut duration: Option<Duration> = None;
    if let Some((start, end)) = groups.time_range {
        time = Some(start);
        let mut delta = end.total_minutes() as i64 - start.total_minutes() as i64;
        if delta <= 0 {
            // Inverted after propagation: read as crossing midnight.
            delta += 24 * 60;
        }
        duration = Some(Duration::minutes(delta));
    } else if !groups.times.is_empty() {
        if groups.times.len() > 1 {
            let kept = groups.times.last().map(|(_, t)| *t);
            conflicts.push(format!(
                "multiple explicit times given; keeping the last one ({:02}:{:02})",
                kept.map(|t| t.hour).unwrap_or(0),
                kept.map(|t| t.minute).unwrap_or(0),
            ));
        }
        time = groups.times.last().map(|(_, t)| *t);
    }
    let has_explicit_time = time.is_some();
    if time.is_none() {
        if let Some(part) = groups.part_of_day {
            time = Some(ClockTime::new(prefs.part_of_day_hour(part), 0));
        } else if groups.weekend.is_some() {
            time = Some(ClockTime::new(prefs.weekend_hour, 0));
        }
    }

    // Calendar-date dimension.
    let mut date: Option<NaiveDate> = None;
    if let Some(parts) = groups.absolute_date {
        date = NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day);
        if date.is_none() {
            debug!(?parts, "fallback date components are not a real date");
        }
        if time.is_none() {
            if let Some(hour) = parts.hour {
                time = Some(ClockTime::new(hour, parts.minute.unwrap_or(0)));
            }
        }
    }
    if date.is_none() {
        if let Some(day) = groups.relative_day {
            date = Some(reference.date() + Duration::days(day.day_offset()));
        }
    }
    if date.is_none() {
        if let Some(day) = groups.ordinal_day {
            date = roll_forward_ordinal(reference.date(), day);
        }
    }
    if date.is_none() {
        if let Some(week) = groups.weekend {
            let offset = week.map(|w| w.offset()).unwrap_or(0);
            date = Some(saturday_of_week(reference.date(), prefs.start_of_week) + Duration::days(offset * 7));
        }
    }
    if date.is_none() {
        if let Some((index, modifier)) = groups.weekday {
            date = Some(resolve_weekday(
                reference.date(),
                index,
                modifier,
                groups.relative_week,
            ));
        } else if let Some(week) = groups.relative_week {
            date = Some(reference.date() + Duration::days(week.offset() * 7));
        }
    }

    // Pure duration offsets only fire when nothing fixed a date or time.
    let mut offset_instant: Option<NaiveDateTime> = None;
    if date.is_none() && time.is_none() {
        if let Some((value, unit)) = groups.duration_offset {
            offset_instant = apply_offset(reference, value, unit);
        }
    }

    let instant = offset_instant.unwrap_or_else(|| {
        let day = date.unwrap_or_else(|| reference.date());
        let clock = time
            .and_then(|t| NaiveTime::from_hms_opt(t.hour, t.minute, 0))
            .unwrap_or_else(|| reference.time());
        NaiveDateTime::new(day, clock)
    });

    // Range-vs-instant decision. Any explicit time forces an instant.
    let mut range: Option<DateInterval> = None;
    if !has_explicit_time {
        let day = date.unwrap_or_else(|| reference.date());
        if let Some(part) = groups.part_of_day {
            range = part_window(day, part);
        } else if groups.weekend.is_some()
            && groups.absolute_date.is_none()
            && groups.relative_day.is_none()
            && groups.ordinal_day.is_none()
        {
            range = day_span(day, day + Duration::days(1));
        } else if groups.relative_week.is_some()
            && groups.weekday.is_none()
            && groups.relative_day.is_none()
        {
            let offset = groups.relative_week.map(|w| w.offset()).unwrap_or(0);
            let start = if prefs.literal_next_week {
                week_start(reference.date(), prefs.start_of_week) + Duration::days(offset * 7)
            } else {
                reference.date() + Duration::days(offset * 7)
            };
            range = day_span(start, start + Duration::days(6));
        } else if groups.relative_day.is_some() {
            range = day_span(day, day);
        }
    }
    let is_range_query = range.is_some();

    // Confidence.
    let time_bearing = tokens.iter().any(|t| {
        matches!(
            t.kind,
            TokenKind::AbsoluteTime { .. } | TokenKind::TimeRange { .. } | TokenKind::PartOfDay { .. }
        )
    });
    let max_priority = tokens.iter().map(|t| t.priority()).max().unwrap_or(0);
    let mut confidence = 1.0 - 0.2 * conflicts.len() as f64;
    if !time_bearing {
        confidence -= 0.1;
    }
    if max_priority < 50 {
        confidence -= 0.2;
    }
    let confidence = confidence.clamp(0.0, 1.0);

    trace!(%instant, confidence, is_range_query, "interpretation complete");
    TemporalContext {
        instant,
        duration,
        range,
        confidence,
        conflicts,
        is_range_query,
        tokens,
    }
}

/// First-of-kind token groups, except `times` which keeps every explicit
/// time in source order for the rightmost-wins rule.
#[derive(Default)]
struct Groups {
    time_range: Option<(ClockTime, ClockTime)>,
    times: Vec<(usize, ClockTime)>,
    weekday: Option<(u8, Option<WeekdayModifier>)>,
    relative_week: Option<WeekRef>,
    relative_day: Option<RelativeDay>,
    weekend: Option<Option<WeekRef>>,
    part_of_day: Option<PartOfDay>,
    ordinal_day: Option<u32>,
    duration_offset: Option<(i64, DurationUnit)>,
    absolute_date: Option<crate::token::DateParts>,
}

impl Groups {
    fn collect(tokens: &[TemporalToken]) -> Self {
        let mut groups = Groups::default();
        for token in tokens {
            match &token.kind {
                TokenKind::TimeRange { start, end } => {
                    groups.time_range.get_or_insert((*start, *end));
                }
                TokenKind::AbsoluteTime { time } => {
                    groups.times.push((token.span.start, *time));
                }
                TokenKind::Weekday { index, modifier } => {
                    groups.weekday.get_or_insert((*index, *modifier));
                }
                TokenKind::RelativeWeek { week } => {
                    groups.relative_week.get_or_insert(*week);
                }
                TokenKind::RelativeDay { day } => {
                    groups.relative_day.get_or_insert(*day);
                }
                TokenKind::Weekend { week } => {
                    groups.weekend.get_or_insert(*week);
                }
                TokenKind::PartOfDay { part } => {
                    groups.part_of_day.get_or_insert(*part);
                }
                TokenKind::OrdinalDay { day } => {
                    groups.ordinal_day.get_or_insert(*day);
                }
                TokenKind::DurationOffset { value, unit, .. } => {
                    groups.duration_offset.get_or_insert((*value, *unit));
                }
                TokenKind::AbsoluteDate { date } => {
                    groups.absolute_date.get_or_insert(*date);
                }
                TokenKind::Connector => {}
            }
        }
        groups.times.sort_by_key(|(start, _)| *start);
        groups
    }
}

/// Canonical weekday index, Sunday=1 .. Saturday=7.
fn canonical_index(day: ChronoWeekday) -> i64 {
    day.num_days_from_sunday() as i64 + 1
}

/// First day of the calendar week containing `date`.
fn week_start(date: NaiveDate, start_of_week: u8) -> NaiveDate {
    let back = (canonical_index(date.weekday()) + 7 - start_of_week as i64) % 7;
    date - Duration::days(back)
}

fn saturday_of_week(date: NaiveDate, start_of_week: u8) -> NaiveDate {
    let forward = (14 - start_of_week as i64) % 7;
    week_start(date, start_of_week) + Duration::days(forward)
}

/// The weekday/week combination rule: the weekday's own modifier
/// overrides a week token's offset, and a bare weekday never resolves
/// into the past.
fn resolve_weekday(
    reference: NaiveDate,
    target: u8,
    modifier: Option<WeekdayModifier>,
    week: Option<WeekRef>,
) -> NaiveDate {
    let mut week_offset = week.map(|w| w.offset()).unwrap_or(0);
    match modifier {
        Some(WeekdayModifier::Next) => week_offset = week_offset.max(1),
        Some(WeekdayModifier::Last) => week_offset = week_offset.min(-1),
        Some(WeekdayModifier::This) => week_offset = 0,
        None => {}
    }
    let mut days = target as i64 - canonical_index(reference.weekday());
    if week_offset != 0 {
        days += week_offset * 7;
    } else if days < 0 {
        days += 7;
    }
    reference + Duration::days(days)
}

/// "The Nth": stay in the reference month unless that date already
/// passed, then roll to the next month carrying the same day-of-month,
/// skipping months where the day does not exist.
fn roll_forward_ordinal(reference: NaiveDate, day: u32) -> Option<NaiveDate> {
    let mut year = reference.year();
    let mut month = reference.month();
    for _ in 0..=24 {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(candidate) if candidate >= reference => return Some(candidate),
            _ => {
                month += 1;
                if month > 12 {
                    month = 1;
                    year += 1;
                }
            }
        }
    }
    None
}

fn apply_offset(reference: NaiveDateTime, value: i64, unit: DurationUnit) -> Option<NaiveDateTime> {
    match unit {
        DurationUnit::Minute => reference.checked_add_signed(Duration::minutes(value)),
        DurationUnit::Hour => reference.checked_add_signed(Duration::hours(value)),
        DurationUnit::Day => reference.checked_add_signed(Duration::days(value)),
        DurationUnit::Week => reference.checked_add_signed(Duration::weeks(value)),
        DurationUnit::Month => {
            u32::try_from(value)
                .ok()
                .and_then(|months| reference.checked_add_months(Months::new(months)))
        }
    }
}

/// Closed interval covering whole days, ends at 23:59:59.
fn day_span(first: NaiveDate, last: NaiveDate) -> Option<DateInterval> {
    let start = first.and_hms_opt(0, 0, 0)?;
    let end = last.and_hms_opt(23, 59, 59)?;
    Some(DateInterval::new(start, end))
}

/// A daypart's clock window on `day`, end-exclusive rendered as :59:59.
fn part_window(day: NaiveDate, part: PartOfDay) -> Option<DateInterval> {
    let (from, to) = part.window();
    let start = day.and_hms_opt(from, 0, 0)?;
    let end = if to >= 24 {
        day.and_hms_opt(23, 59, 59)?
    } else {
        day.and_hms_opt(to, 0, 0)? - Duration::seconds(1)
    };
    Some(DateInterval::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn reference() -> NaiveDateTime {
        // Thursday
        NaiveDate::from_ymd_opt(2025, 9, 11)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn tok(kind: TokenKind) -> TemporalToken {
        TemporalToken::new(Span::new(0, 1), "x", kind)
    }

    fn tok_at(start: usize, kind: TokenKind) -> TemporalToken {
        TemporalToken::new(Span::new(start, 1), "x", kind)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_tokens_short_circuit() {
        let ctx = interpret(Vec::new(), reference(), &Preferences::default());
        assert_eq!(ctx.instant, reference());
        assert_eq!(ctx.confidence, 0.0);
        assert!(ctx.conflicts.is_empty());
    }

    #[test]
    fn connectors_alone_mean_nothing() {
        let ctx = interpret(
            vec![tok(TokenKind::Connector)],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.confidence, 0.0);
        assert_eq!(ctx.instant, reference());
    }

    #[test]
    fn bare_weekday_never_resolves_into_the_past() {
        // reference is Thursday; Monday (index 2) must land next week
        let ctx = interpret(
            vec![tok(TokenKind::Weekday {
                index: 2,
                modifier: None,
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 15));
    }

    #[test]
    fn next_weekday_from_thursday_lands_nine_days_out() {
        let ctx = interpret(
            vec![tok(TokenKind::Weekday {
                index: 6,
                modifier: Some(WeekdayModifier::Next),
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 19));
        assert_eq!(ctx.instant.time(), reference().time());
    }

    #[test]
    fn rightmost_time_wins_and_records_a_conflict() {
        let ctx = interpret(
            vec![
                tok_at(10, TokenKind::AbsoluteTime {
                    time: ClockTime::new(20, 0),
                }),
                tok_at(20, TokenKind::AbsoluteTime {
                    time: ClockTime::new(19, 0),
                }),
            ],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.time(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(ctx.conflicts.len(), 1);
        assert!(ctx.confidence < 1.0);
    }

    #[test]
    fn time_range_sets_duration_and_forces_instant() {
        let ctx = interpret(
            vec![tok(TokenKind::TimeRange {
                start: ClockTime::new(21, 0),
                end: ClockTime::new(23, 0),
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.duration, Some(Duration::hours(2)));
        assert!(!ctx.is_range_query);
        assert_eq!(ctx.instant.time(), NaiveTime::from_hms_opt(21, 0, 0).unwrap());
    }

    #[test]
    fn inverted_range_crosses_midnight() {
        let ctx = interpret(
            vec![tok(TokenKind::TimeRange {
                start: ClockTime::new(23, 0),
                end: ClockTime::new(1, 0),
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.duration, Some(Duration::hours(2)));
    }

    #[test]
    fn ordinal_day_rolls_forward_when_passed() {
        let prefs = Preferences::default();
        let ctx = interpret(
            vec![tok(TokenKind::OrdinalDay { day: 5 })],
            reference(),
            &prefs,
        );
        assert_eq!(ctx.instant.date(), date(2025, 10, 5));

        let ctx = interpret(
            vec![tok(TokenKind::OrdinalDay { day: 24 })],
            reference(),
            &prefs,
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 24));
    }

    #[test]
    fn ordinal_day_skips_short_months() {
        // Jan 31 reference: "the 31st" is today; a day later it must
        // skip February entirely.
        let reference = date(2026, 2, 1).and_hms_opt(8, 0, 0).unwrap();
        let ctx = interpret(
            vec![tok(TokenKind::OrdinalDay { day: 31 })],
            reference,
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2026, 3, 31));
    }

    #[test]
    fn bare_weekend_is_this_saturday_range() {
        let ctx = interpret(
            vec![tok(TokenKind::Weekend {
                week: Some(WeekRef::ThisWeek),
            })],
            reference(),
            &Preferences::default(),
        );
        assert!(ctx.is_range_query);
        let range = ctx.range.unwrap();
        assert_eq!(range.start, date(2025, 9, 13).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 9, 14).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(ctx.instant.date(), date(2025, 9, 13));
        assert_eq!(ctx.instant.time(), NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn next_weekend_shifts_a_week() {
        let ctx = interpret(
            vec![tok(TokenKind::Weekend {
                week: Some(WeekRef::NextWeek(1)),
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 20));
    }

    #[test]
    fn standalone_relative_week_is_a_calendar_week_range() {
        let ctx = interpret(
            vec![tok(TokenKind::RelativeWeek {
                week: WeekRef::NextWeek(1),
            })],
            reference(),
            &Preferences::default(),
        );
        assert!(ctx.is_range_query);
        let range = ctx.range.unwrap();
        assert_eq!(range.start, date(2025, 9, 15).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 9, 21).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(ctx.instant.date(), date(2025, 9, 18));
    }

    #[test]
    fn rolling_week_window_when_not_literal() {
        let prefs = Preferences {
            literal_next_week: false,
            ..Preferences::default()
        };
        let ctx = interpret(
            vec![tok(TokenKind::RelativeWeek {
                week: WeekRef::NextWeek(1),
            })],
            reference(),
            &prefs,
        );
        let range = ctx.range.unwrap();
        assert_eq!(range.start, date(2025, 9, 18).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 9, 24).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn week_plus_time_is_an_instant() {
        let ctx = interpret(
            vec![
                tok(TokenKind::RelativeWeek {
                    week: WeekRef::NextWeek(1),
                }),
                tok_at(10, TokenKind::AbsoluteTime {
                    time: ClockTime::new(11, 0),
                }),
            ],
            reference(),
            &Preferences::default(),
        );
        assert!(!ctx.is_range_query);
        assert_eq!(
            ctx.instant,
            date(2025, 9, 18).and_hms_opt(11, 0, 0).unwrap()
        );
        assert_eq!(ctx.confidence, 1.0);
    }

    #[test]
    fn last_week_goes_backwards() {
        let ctx = interpret(
            vec![tok(TokenKind::RelativeWeek {
                week: WeekRef::LastWeek(1),
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 4));
    }

    #[test]
    fn weekday_with_week_token_combines() {
        // "Friday next week"
        let ctx = interpret(
            vec![
                tok(TokenKind::Weekday {
                    index: 6,
                    modifier: None,
                }),
                tok_at(10, TokenKind::RelativeWeek {
                    week: WeekRef::NextWeek(1),
                }),
            ],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(ctx.instant.date(), date(2025, 9, 19));
        assert!(!ctx.is_range_query);
    }

    #[test]
    fn part_of_day_yields_window_and_anchor() {
        let ctx = interpret(
            vec![tok(TokenKind::PartOfDay {
                part: PartOfDay::Morning,
            })],
            reference(),
            &Preferences::default(),
        );
        assert!(ctx.is_range_query);
        let range = ctx.range.unwrap();
        assert_eq!(range.start, date(2025, 9, 11).and_hms_opt(6, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 9, 11).and_hms_opt(11, 59, 59).unwrap());
        assert_eq!(ctx.instant.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn relative_day_alone_is_a_day_range() {
        let ctx = interpret(
            vec![tok(TokenKind::RelativeDay {
                day: RelativeDay::Tomorrow,
            })],
            reference(),
            &Preferences::default(),
        );
        assert!(ctx.is_range_query);
        let range = ctx.range.unwrap();
        assert_eq!(range.start, date(2025, 9, 12).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, date(2025, 9, 12).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn duration_offsets_shift_the_reference() {
        let prefs = Preferences::default();
        let ctx = interpret(
            vec![tok(TokenKind::DurationOffset {
                value: 2,
                unit: DurationUnit::Hour,
                mode: crate::token::OffsetMode::FromNow,
            })],
            reference(),
            &prefs,
        );
        assert_eq!(ctx.instant, reference() + Duration::hours(2));
        // priority 40 < 50 and no time-bearing token
        assert!((ctx.confidence - 0.7).abs() < 1e-9);

        let ctx = interpret(
            vec![tok(TokenKind::DurationOffset {
                value: 1,
                unit: DurationUnit::Month,
                mode: crate::token::OffsetMode::FromNow,
            })],
            reference(),
            &prefs,
        );
        assert_eq!(ctx.instant.date(), date(2025, 10, 11));
    }

    #[test]
    fn absolute_date_adopts_carried_time() {
        let ctx = interpret(
            vec![tok(TokenKind::AbsoluteDate {
                date: crate::token::DateParts {
                    year: 2026,
                    month: 3,
                    day: 5,
                    hour: Some(19),
                    minute: Some(30),
                },
            })],
            reference(),
            &Preferences::default(),
        );
        assert_eq!(
            ctx.instant,
            date(2026, 3, 5).and_hms_opt(19, 30, 0).unwrap()
        );
    }
}
