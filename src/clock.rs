//! Time-of-day parsing: the locale-parameterized time grammar, AM/PM
//! application, and meridiem propagation across range endpoints.
//!
//! Everything here is a pure function over structured values; the grammar is
//! compiled once per language pack and shared read-only afterwards.

use regex::Regex;

/// A resolved 24-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// An AM/PM marker as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A parsed but not yet resolved time-of-day.
///
/// `hour` is the literal digits from the text; [`ParsedTime::resolve`]
/// applies the meridiem rules to produce a 24-hour [`ClockTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Option<Meridiem>,
}

impl ParsedTime {
    pub fn new(hour: u32, minute: u32, meridiem: Option<Meridiem>) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    fn with_meridiem(self, meridiem: Meridiem) -> Self {
        Self {
            meridiem: Some(meridiem),
            ..self
        }
    }

    /// Apply the AM/PM rules: pm adds 12 when the hour is below 12, am maps
    /// hour 12 to 0, and no marker leaves the 24-hour value unchanged.
    pub fn resolve(&self) -> ClockTime {
        let hour = match self.meridiem {
            Some(Meridiem::Pm) if self.hour < 12 => self.hour + 12,
            Some(Meridiem::Am) if self.hour == 12 => 0,
            _ => self.hour,
        };
        ClockTime::new(hour, self.minute)
    }

    fn resolved_minutes(&self) -> u32 {
        self.resolve().total_minutes()
    }

    fn raw_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// Locale-parameterized time-of-day grammar.
///
/// Accepts an hour (0-23, or 1-12 with a marker), an optional `:MM`, an
/// optional `h`/`hs`/`hrs` unit marker with optional trailing two-digit
/// minutes ("15h30"), and an optional trailing meridiem marker drawn from the
/// locale's word lists ("pm", "da noite", "de la tarde").
#[derive(Debug, Clone)]
pub struct TimeGrammar {
    pattern: Regex,
    am_markers: Vec<String>,
    noon_words: Vec<String>,
    midnight_words: Vec<String>,
}

impl TimeGrammar {
    pub fn new(
        am_markers: &[&str],
        pm_markers: &[&str],
        noon_words: &[&str],
        midnight_words: &[&str],
    ) -> Result<Self, regex::Error> {
        let meridiem_alt = am_markers
            .iter()
            .chain(pm_markers.iter())
            .map(|m| regex::escape(m).replace(r"\ ", r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"(?i)^\s*(?P<hour>\d{{1,2}})(?::(?P<min>\d{{2}}))?(?:\s*(?:h|hs|hrs)\s*(?P<hmin>\d{{2}})?)?\s*(?P<mer>{meridiem_alt})?\s*$"
        ))?;
        Ok(Self {
            pattern,
            am_markers: am_markers.iter().map(|m| fold_marker(m)).collect(),
            noon_words: noon_words.iter().map(|m| fold_marker(m)).collect(),
            midnight_words: midnight_words.iter().map(|m| fold_marker(m)).collect(),
        })
    }

    /// Parse a candidate time string in full. Returns `None` when the text is
    /// not entirely a time expression or the digits are out of range.
    pub fn parse(&self, text: &str) -> Option<ParsedTime> {
        let caps = self.pattern.captures(text)?;
        let hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
        let minute: u32 = caps
            .name("min")
            .or_else(|| caps.name("hmin"))
            .map(|m| m.as_str().parse())
            .transpose()
            .ok()?
            .unwrap_or(0);
        if hour > 23 || minute > 59 {
            return None;
        }
        let meridiem = caps.name("mer").map(|m| {
            if self.is_am_marker(m.as_str()) {
                Meridiem::Am
            } else {
                Meridiem::Pm
            }
        });
        Some(ParsedTime::new(hour, minute, meridiem))
    }

    /// Recognize the locale's literal noon/midnight words.
    pub fn literal(&self, text: &str) -> Option<ClockTime> {
        let folded = fold_marker(text.trim());
        if self.noon_words.iter().any(|w| *w == folded) {
            return Some(ClockTime::new(12, 0));
        }
        if self.midnight_words.iter().any(|w| *w == folded) {
            return Some(ClockTime::new(0, 0));
        }
        None
    }

    fn is_am_marker(&self, marker: &str) -> bool {
        let folded = fold_marker(marker);
        self.am_markers.iter().any(|m| *m == folded)
    }
}

/// Case/diacritic/whitespace folding for marker comparison.
fn fold_marker(text: &str) -> String {
    crate::pack::fold(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Meridiem propagation across the two endpoints of a time range.
///
/// Operates on structured values and returns new endpoints; the source text
/// is never touched. Rules, in order:
///
/// 1. First endpoint unmarked, second marked "pm": promote the first to "pm"
///    when that still leaves it before the second ("9 to 11pm" is 21-23).
/// 2. First endpoint marked, second unmarked: copy the first's marker to the
///    second only when the second's literal hour is below 12, it already
///    reads later than the first's literal value, and the copy keeps the
///    endpoints in order ("9pm to 11" is 21-23).
/// 3. If the range is still inverted, attempt one final promotion of the end
///    to "pm"; an inverted range that survives that is returned as-is, never
///    swapped.
pub fn propagate_meridiem(start: ParsedTime, end: ParsedTime) -> (ParsedTime, ParsedTime) {
    let mut start = start;
    let mut end = end;

    match (start.meridiem, end.meridiem) {
        (None, Some(Meridiem::Pm)) => {
            let promoted = start.with_meridiem(Meridiem::Pm);
            if promoted.resolved_minutes() < end.resolved_minutes() {
                start = promoted;
            }
        }
        (Some(marker), None) => {
            let promoted = end.with_meridiem(marker);
            if end.hour < 12
                && end.raw_minutes() > start.raw_minutes()
                && promoted.resolved_minutes() > start.resolved_minutes()
            {
                end = promoted;
            }
        }
        _ => {}
    }

    if start.resolved_minutes() >= end.resolved_minutes() && end.meridiem.is_none() && end.hour < 12
    {
        let promoted = end.with_meridiem(Meridiem::Pm);
        if promoted.resolved_minutes() > start.resolved_minutes() {
            end = promoted;
        }
    }

    (start, end)
}
