//! Regex-driven token detection. Every category a pack publishes a
//! pattern for is scanned independently; overlap resolution is the
//! selector's job, not ours.

use regex::Match;
use tracing::{debug, trace};

use crate::clock::propagate_meridiem;
use crate::fallback::FallbackRecognizer;
use crate::pack::LanguagePack;
use crate::token::{
    OffsetMode, Span, TemporalToken, TokenKind, WeekRef, WeekdayModifier,
};

pub struct TokenDetector<'a> {
    pack: &'a dyn LanguagePack,
    fallback: &'a dyn FallbackRecognizer,
}

impl<'a> TokenDetector<'a> {
    pub fn new(pack: &'a dyn LanguagePack, fallback: &'a dyn FallbackRecognizer) -> Self {
        Self { pack, fallback }
    }

    /// Scan `text` and return every candidate token, unfiltered.
    pub fn detect(&self, text: &str) -> Vec<TemporalToken> {
        let mut tokens = Vec::new();

        self.detect_ranges(text, &mut tokens);
        self.detect_weekday_times(text, &mut tokens);
        self.detect_times(text, &mut tokens);
        self.detect_weekdays(text, &mut tokens);
        self.detect_weeks(text, &mut tokens);
        self.detect_weekends(text, &mut tokens);
        let part_spans = self.detect_parts_of_day(text, &mut tokens);
        self.detect_relative_days(text, &part_spans, &mut tokens);
        self.detect_ordinal_days(text, &mut tokens);
        self.detect_durations(text, &mut tokens);
        self.detect_connectors(text, &mut tokens);
        self.detect_fallback(text, &mut tokens);

        debug!(count = tokens.len(), "detection pass complete");
        tokens
    }

    fn detect_ranges(&self, text: &str, out: &mut Vec<TemporalToken>) {
        for pattern in [self.pack.from_to_pattern(), self.pack.between_pattern()]
            .into_iter()
            .flatten()
        {
            for caps in pattern.captures_iter(text) {
                let (a, b) = match (caps.name("a"), caps.name("b")) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                let grammar = self.pack.time_grammar();
                let (start, end) = match (grammar.parse(a.as_str()), grammar.parse(b.as_str())) {
                    (Some(start), Some(end)) => propagate_meridiem(start, end),
                    _ => continue,
                };
                let range = match caps.name("range").or_else(|| caps.get(0)) {
                    Some(m) => span_of(&m),
                    None => continue,
                };
                push(out, text, range, TokenKind::TimeRange {
                    start: start.resolve(),
                    end: end.resolve(),
                });
                if let Some(wd) = caps.name("wd") {
                    self.push_weekday(text, &wd, None, out);
                }
            }
        }
    }

    fn detect_weekday_times(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.weekday_time_pattern() {
            Some(p) => p,
            None => return,
        };
        let grammar = self.pack.time_grammar();
        for caps in pattern.captures_iter(text) {
            let wd = match caps.name("wd") {
                Some(wd) => wd,
                None => continue,
            };
            let t1 = match caps.name("t1").and_then(|m| {
                grammar.parse(m.as_str()).map(|parsed| (m, parsed))
            }) {
                Some(pair) => pair,
                None => continue,
            };
            match caps.name("t2").and_then(|m| {
                grammar.parse(m.as_str()).map(|parsed| (m, parsed))
            }) {
                Some((m2, end)) => {
                    let (start, end) = propagate_meridiem(t1.1, end);
                    let span = Span::new(t1.0.start(), m2.end() - t1.0.start());
                    push(out, text, span, TokenKind::TimeRange {
                        start: start.resolve(),
                        end: end.resolve(),
                    });
                }
                None => {
                    push(out, text, span_of(&t1.0), TokenKind::AbsoluteTime {
                        time: t1.1.resolve(),
                    });
                }
            }
            self.push_weekday(text, &wd, None, out);
        }
    }

    fn detect_times(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.time_only_pattern() {
            Some(p) => p,
            None => return,
        };
        let grammar = self.pack.time_grammar();
        for caps in pattern.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => span_of(&m),
                None => continue,
            };
            let time = if let Some(word) = caps.name("word") {
                grammar.literal(word.as_str())
            } else if let Some(m) = caps.name("cued").or_else(|| caps.name("time")) {
                grammar.parse(m.as_str()).map(|p| p.resolve())
            } else {
                None
            };
            if let Some(time) = time {
                push(out, text, whole, TokenKind::AbsoluteTime { time });
            }
        }
    }

    fn detect_weekdays(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.weekday_pattern() {
            Some(p) => p,
            None => return,
        };
        for caps in pattern.captures_iter(text) {
            let wd = match caps.name("weekday") {
                Some(wd) => wd,
                None => continue,
            };
            let modifier = caps
                .name("modifier")
                .or_else(|| caps.name("postmod"))
                .and_then(|m| self.classify_modifier(m.as_str()));
            let whole = match caps.get(0) {
                Some(m) => span_of(&m),
                None => continue,
            };
            if let Some(index) = self.pack.weekday_table().lookup(wd.as_str()) {
                push(out, text, whole, TokenKind::Weekday { index, modifier });
            } else {
                trace!(word = wd.as_str(), "weekday candidate not in table");
            }
        }
    }

    fn detect_weeks(&self, text: &str, out: &mut Vec<TemporalToken>) {
        if let Some(pattern) = self.pack.week_pattern() {
            for m in pattern.find_iter(text) {
                let phrase = m.as_str();
                let week = if self.pack.signals_last(phrase) {
                    WeekRef::LastWeek(1)
                } else {
                    match self.pack.next_repetition_count(phrase) {
                        0 => WeekRef::ThisWeek,
                        n => WeekRef::NextWeek(n),
                    }
                };
                push(out, text, span_of(&m), TokenKind::RelativeWeek { week });
            }
        }
        if let Some(pattern) = self.pack.bare_week_pattern() {
            for m in pattern.find_iter(text) {
                push(out, text, span_of(&m), TokenKind::RelativeWeek {
                    week: WeekRef::ThisWeek,
                });
            }
        }
    }

    fn detect_weekends(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.weekend_pattern() {
            Some(p) => p,
            None => return,
        };
        for m in pattern.find_iter(text) {
            let phrase = m.as_str();
            let week = if self.pack.signals_next(phrase) {
                Some(WeekRef::NextWeek(1))
            } else {
                Some(WeekRef::ThisWeek)
            };
            push(out, text, span_of(&m), TokenKind::Weekend { week });
        }
    }

    fn detect_parts_of_day(&self, text: &str, out: &mut Vec<TemporalToken>) -> Vec<Span> {
        let pattern = match self.pack.part_of_day_pattern() {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut spans = Vec::new();
        for caps in pattern.captures_iter(text) {
            let word = match caps.name("word").or_else(|| caps.name("word2")) {
                Some(word) => word,
                None => continue,
            };
            if let Some(part) = self.pack.part_of_day_of(word.as_str()) {
                let whole = match caps.get(0) {
                    Some(m) => span_of(&m),
                    None => continue,
                };
                spans.push(whole);
                push(out, text, whole, TokenKind::PartOfDay { part });
            }
        }
        spans
    }

    fn detect_relative_days(
        &self,
        text: &str,
        part_spans: &[Span],
        out: &mut Vec<TemporalToken>,
    ) {
        let pattern = match self.pack.relative_day_pattern() {
            Some(p) => p,
            None => return,
        };
        let suppress = self.pack.suppress_relative_day_inside_part_of_day();
        for m in pattern.find_iter(text) {
            let span = span_of(&m);
            if suppress && part_spans.iter().any(|p| p.contains(&span)) {
                trace!(phrase = m.as_str(), "relative day inside part-of-day phrase");
                continue;
            }
            // A matched phrase with no mapping is deliberately consumed
            // so its inner words cannot fire on their own.
            if let Some(day) = self.pack.relative_day_of(m.as_str()) {
                push(out, text, span, TokenKind::RelativeDay { day });
            }
        }
    }

    fn detect_ordinal_days(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.ordinal_day_pattern() {
            Some(p) => p,
            None => return,
        };
        for caps in pattern.captures_iter(text) {
            let day: u32 = match caps
                .name("day")
                .or_else(|| caps.name("day2"))
                .and_then(|m| m.as_str().parse().ok())
            {
                Some(day) => day,
                None => continue,
            };
            if !(1..=31).contains(&day) {
                continue;
            }
            let whole = match caps.get(0) {
                Some(m) => span_of(&m),
                None => continue,
            };
            push(out, text, whole, TokenKind::OrdinalDay { day });
        }
    }

    fn detect_durations(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let cases = [
            (self.pack.in_duration_pattern(), OffsetMode::FromNow, false),
            (self.pack.by_duration_pattern(), OffsetMode::Shift, false),
            (
                self.pack.article_duration_pattern(),
                OffsetMode::FromNow,
                true,
            ),
        ];
        for (pattern, mode, article) in cases {
            let pattern = match pattern {
                Some(p) => p,
                None => continue,
            };
            for caps in pattern.captures_iter(text) {
                let value: i64 = if article {
                    1
                } else {
                    match caps.name("value").and_then(|m| m.as_str().parse().ok()) {
                        Some(v) => v,
                        None => continue,
                    }
                };
                let unit = match caps
                    .name("unit")
                    .and_then(|m| self.pack.duration_unit_of(m.as_str()))
                {
                    Some(unit) => unit,
                    None => continue,
                };
                let whole = match caps.get(0) {
                    Some(m) => span_of(&m),
                    None => continue,
                };
                push(out, text, whole, TokenKind::DurationOffset { value, unit, mode });
            }
        }
    }

    fn detect_connectors(&self, text: &str, out: &mut Vec<TemporalToken>) {
        let pattern = match self.pack.connector_pattern() {
            Some(p) => p,
            None => return,
        };
        for m in pattern.find_iter(text) {
            push(out, text, span_of(&m), TokenKind::Connector);
        }
    }

    /// Spans claimed by the host recognizer become absolute dates, unless
    /// the span is really a clock time or a relative phrase the pack
    /// already understands.
    fn detect_fallback(&self, text: &str, out: &mut Vec<TemporalToken>) {
        for recognized in self.fallback.recognize(text) {
            let span = recognized.span;
            let slice = match text.get(span.start..span.end()) {
                Some(slice) => slice,
                None => {
                    debug!(?span, "fallback span out of bounds, dropped");
                    continue;
                }
            };
            let grammar = self.pack.time_grammar();
            if let Some(time) = grammar
                .parse(slice)
                .map(|p| p.resolve())
                .or_else(|| grammar.literal(slice))
            {
                push(out, text, span, TokenKind::AbsoluteTime { time });
                continue;
            }
            if self.relative_patterns_match(slice) {
                trace!(slice, "fallback span shadowed by a relative phrase");
                continue;
            }
            push(out, text, span, TokenKind::AbsoluteDate {
                date: recognized.date,
            });
        }
    }

    fn relative_patterns_match(&self, slice: &str) -> bool {
        [
            self.pack.weekday_pattern(),
            self.pack.week_pattern(),
            self.pack.bare_week_pattern(),
            self.pack.relative_day_pattern(),
            self.pack.part_of_day_pattern(),
        ]
        .into_iter()
        .flatten()
        .any(|p| p.is_match(slice))
    }

    fn push_weekday(
        &self,
        text: &str,
        m: &Match,
        modifier: Option<WeekdayModifier>,
        out: &mut Vec<TemporalToken>,
    ) {
        if let Some(index) = self.pack.weekday_table().lookup(m.as_str()) {
            push(out, text, span_of(m), TokenKind::Weekday { index, modifier });
        }
    }

    fn classify_modifier(&self, word: &str) -> Option<WeekdayModifier> {
        if self.pack.signals_next(word) {
            Some(WeekdayModifier::Next)
        } else if self.pack.signals_last(word) {
            Some(WeekdayModifier::Last)
        } else if self.pack.signals_this(word) {
            Some(WeekdayModifier::This)
        } else {
            None
        }
    }
}

fn span_of(m: &Match) -> Span {
    Span::new(m.start(), m.end() - m.start())
}

fn push(out: &mut Vec<TemporalToken>, text: &str, span: Span, kind: TokenKind) {
    let matched = text.get(span.start..span.end()).unwrap_or_default();
    out.push(TemporalToken::new(span, matched, kind));
}
