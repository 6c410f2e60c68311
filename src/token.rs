//! Core token types for temporal expression detection.
//!
//! A [`TemporalToken`] is a classified, located span of source text carrying
//! one unit of temporal meaning. Tokens are produced transiently per parse
//! call and never persisted.

use crate::clock::ClockTime;

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Length of the match in bytes.
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last matched byte.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Length of the overlap between two spans, in bytes.
    pub fn intersection_len(&self, other: &Span) -> usize {
        let lo = self.start.max(other.start);
        let hi = self.end().min(other.end());
        hi.saturating_sub(lo)
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }
}

/// The "this"/"next"/"last" qualifier attached to a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayModifier {
    This,
    Next,
    Last,
}

/// Which calendar week a relative-week or weekend phrase points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekRef {
    ThisWeek,
    /// "next week" repeated n times ("next next week" is `NextWeek(2)`).
    NextWeek(u32),
    LastWeek(u32),
}

impl WeekRef {
    /// Signed week offset relative to the reference week.
    pub fn offset(&self) -> i64 {
        match self {
            WeekRef::ThisWeek => 0,
            WeekRef::NextWeek(n) => i64::from(*n),
            WeekRef::LastWeek(n) => -i64::from(*n),
        }
    }
}

/// A day named relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
    /// Same date as the reference, evening connotation.
    Tonight,
}

impl RelativeDay {
    /// Day offset applied to the reference date.
    pub fn day_offset(&self) -> i64 {
        match self {
            RelativeDay::Today | RelativeDay::Tonight => 0,
            RelativeDay::Tomorrow => 1,
            RelativeDay::Yesterday => -1,
        }
    }
}

/// A vague daypart word ("morning", "tonight at some point").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
    Noon,
    Midnight,
}

impl PartOfDay {
    /// Canonical `[start, end)` clock-hour window for this daypart.
    ///
    /// The window is locale-independent; the anchor *hour* inside the window
    /// comes from [`Preferences`](crate::Preferences).
    pub fn window(&self) -> (u32, u32) {
        match self {
            PartOfDay::Morning => (6, 12),
            PartOfDay::Afternoon => (12, 18),
            PartOfDay::Evening => (18, 22),
            PartOfDay::Night => (20, 24),
            PartOfDay::Noon => (12, 13),
            PartOfDay::Midnight => (0, 1),
        }
    }
}

/// Unit of a duration-offset phrase ("in 20 minutes", "by 2 weeks").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// How a duration offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetMode {
    /// "in 20 minutes", "a week from now" - counted from the reference time.
    FromNow,
    /// "by 2 weeks" - pushes an existing moment by the amount.
    Shift,
}

/// Full date components carried by a fallback-recognized absolute date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
}

/// The closed set of token classifications.
///
/// Each kind carries a fixed priority consumed by the selector; higher wins
/// when one token's span fully covers another's.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// "from 9 to 11", "9-11pm".
    TimeRange { start: ClockTime, end: ClockTime },
    /// "at 7pm", "15h30", "noon".
    AbsoluteTime { time: ClockTime },
    /// A weekday name with optional this/next/last modifier. The index is
    /// canonical: Sunday=1 .. Saturday=7, regardless of locale.
    Weekday {
        index: u8,
        modifier: Option<WeekdayModifier>,
    },
    /// "next week", "semana que vem".
    RelativeWeek { week: WeekRef },
    /// "today", "tomorrow", "tonight", "ontem".
    RelativeDay { day: RelativeDay },
    /// "weekend", "fim de semana". `None` means a bare mention.
    Weekend { week: Option<WeekRef> },
    /// "morning", "por la mañana".
    PartOfDay { part: PartOfDay },
    /// "the 24th", "dia 24", "el 11".
    OrdinalDay { day: u32 },
    /// "in 2 hours", "by 3 days", "a month from now".
    DurationOffset {
        value: i64,
        unit: DurationUnit,
        mode: OffsetMode,
    },
    /// A full date resolved by the fallback recognizer.
    AbsoluteDate { date: DateParts },
    /// A scheduling preposition ("at", "on", "às") with no payload.
    Connector,
}

impl TokenKind {
    /// Fixed selector priority for this kind.
    pub fn priority(&self) -> u8 {
        match self {
            TokenKind::TimeRange { .. } => 90,
            TokenKind::AbsoluteTime { .. } => 80,
            TokenKind::Weekday { .. } => 75,
            TokenKind::RelativeWeek { .. } => 74,
            TokenKind::RelativeDay { .. } => 73,
            TokenKind::Weekend { .. } => 72,
            TokenKind::PartOfDay { .. } => 70,
            TokenKind::OrdinalDay { .. } => 60,
            TokenKind::DurationOffset { .. } => 40,
            TokenKind::AbsoluteDate { .. } => 10,
            TokenKind::Connector => 5,
        }
    }
}

/// A classified, located span of text representing one unit of temporal
/// meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalToken {
    pub span: Span,
    /// The matched substring, verbatim.
    pub text: String,
    pub kind: TokenKind,
}

impl TemporalToken {
    pub fn new(span: Span, text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            span,
            text: text.into(),
            kind,
        }
    }

    pub fn priority(&self) -> u8 {
        self.kind.priority()
    }
}
