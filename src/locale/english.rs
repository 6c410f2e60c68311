//! English language pack.

use regex::Regex;

use crate::clock::TimeGrammar;
use crate::pack::{count_occurrences, fold, LanguagePack, PackError, WeekdayTable};
use crate::token::{DurationUnit, PartOfDay, RelativeDay};

use super::compile;

/// Weekday surface forms, longest first so the alternation prefers full names.
const WEEKDAYS: &str =
    "sunday|monday|tuesday|wednesday|thursday|friday|saturday|thurs|tues|thur|weds|sun|mon|tue|wed|thu|fri|sat";

/// A time-range endpoint: hour, optional minutes, optional meridiem.
const ENDPOINT: &str = r"\d{1,2}(?::\d{2})?(?:\s*(?:am|pm)\b|\s*(?:a\.m\.|p\.m\.)|\b)";

const UNITS: &str = "minutes|minute|mins|min|hours|hour|hrs|hr|days|day|weeks|week|wks|wk|months|month";

const THIS_WORDS: &[&str] = &["this"];
const NEXT_WORDS: &[&str] = &["next", "coming"];
const LAST_WORDS: &[&str] = &["last", "past", "previous"];

pub struct EnglishPack {
    weekdays: WeekdayTable,
    grammar: TimeGrammar,
    weekday: Regex,
    week: Regex,
    bare_week: Regex,
    weekend: Regex,
    relative_day: Regex,
    part_of_day: Regex,
    ordinal_day: Regex,
    weekday_time: Regex,
    from_to: Regex,
    between: Regex,
    time_only: Regex,
    in_duration: Regex,
    by_duration: Regex,
    article_duration: Regex,
    connector: Regex,
    command_prefix: Regex,
}

impl EnglishPack {
    pub fn new() -> Result<Self, PackError> {
        let weekdays = WeekdayTable::from_names([
            "sunday",
            "monday",
            "tuesday",
            "wednesday",
            "thursday",
            "friday",
            "saturday",
        ])
        .alias("sun", 1)
        .alias("mon", 2)
        .alias("tue", 3)
        .alias("tues", 3)
        .alias("wed", 4)
        .alias("weds", 4)
        .alias("thu", 5)
        .alias("thur", 5)
        .alias("thurs", 5)
        .alias("fri", 6)
        .alias("sat", 7);

        let grammar = TimeGrammar::new(
            &["am", "a.m."],
            &["pm", "p.m."],
            &["noon", "midday"],
            &["midnight"],
        )
        .map_err(|e| PackError::pattern("time grammar", e))?;

        Ok(Self {
            weekdays,
            grammar,
            weekday: compile(
                "weekday",
                &format!(
                    r"(?i)\b(?:(?P<modifier>this|next|coming|last)\s+)?(?P<weekday>{WEEKDAYS})\b"
                ),
            )?,
            week: compile(
                "week",
                r"(?i)\b(?P<prefix>(?:(?:this|next|coming|last)\s+)+)week\b",
            )?,
            bare_week: compile("bare week", r"(?i)\b(?:my|the)\s+week\b")?,
            weekend: compile(
                "weekend",
                r"(?i)\b(?:(?P<modifier>this|next|coming)\s+)?weekend\b",
            )?,
            relative_day: compile(
                "relative day",
                r"(?i)\b(?:today|tonight|tomorrow|tmrw|tmr|yesterday)\b",
            )?,
            part_of_day: compile(
                "part of day",
                r"(?i)\b(?:in\s+the\s+|at\s+)?(?P<word>morning|afternoon|evening|night|noon|midday|midnight)\b",
            )?,
            ordinal_day: compile(
                "ordinal day",
                r"(?i)\b(?:on\s+)?the\s+(?P<day>\d{1,2})(?:st|nd|rd|th)?\b|\b(?P<day2>\d{1,2})(?:st|nd|rd|th)\b",
            )?,
            weekday_time: compile(
                "weekday time",
                &format!(
                    r"(?i)\b(?P<wd>{WEEKDAYS})\s+(?:at\s+)?(?P<t1>{ENDPOINT})(?:\s*(?:-|–|to)\s*(?P<t2>{ENDPOINT}))?"
                ),
            )?,
            from_to: compile(
                "from-to range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>from\s+(?P<a>{ENDPOINT})\s*(?:to|until|till)\s*(?P<b>{ENDPOINT}))"
                ),
            )?,
            between: compile(
                "between range",
                &format!(
                    r"(?i)\b(?:(?P<wd>{WEEKDAYS})\s+)?(?P<range>between\s+(?P<a>{ENDPOINT})\s+and\s+(?P<b>{ENDPOINT}))"
                ),
            )?,
            time_only: compile(
                "time only",
                &format!(
                    r"(?i)\b(?P<word>noon|midday|midnight)\b|\bat\s+(?P<cued>{ENDPOINT})|\b(?P<time>\d{{1,2}}:\d{{2}}(?:\s*(?:am|pm)\b|\s*(?:a\.m\.|p\.m\.)|\b)|\d{{1,2}}\s*(?:am|pm)\b|\d{{1,2}}\s*(?:a\.m\.|p\.m\.))"
                ),
            )?,
            in_duration: compile(
                "in-duration",
                &format!(r"(?i)\b(?:in|within)\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"),
            )?,
            by_duration: compile(
                "by-duration",
                &format!(r"(?i)\bby\s+(?P<value>\d+)\s*(?P<unit>{UNITS})\b"),
            )?,
            article_duration: compile(
                "article duration",
                r"(?i)\ban?\s+(?P<unit>minute|hour|day|week|month)\s+from\s+now\b",
            )?,
            connector: compile("connector", r"(?i)\b(?:at|on)\b")?,
            command_prefix: compile(
                "command prefix",
                r"(?i)^\s*(?:please\s+)?(?:remind\s+me\s+to|remind\s+me|schedule|add|create|set\s+up|move|push\s+back|reschedule|cancel|delete|show\s+me|show|what's|whats)\b\s*",
            )?,
        })
    }
}

impl LanguagePack for EnglishPack {
    fn weekday_table(&self) -> &WeekdayTable {
        &self.weekdays
    }

    fn time_grammar(&self) -> &TimeGrammar {
        &self.grammar
    }

    fn this_words(&self) -> &[&str] {
        THIS_WORDS
    }

    fn next_words(&self) -> &[&str] {
        NEXT_WORDS
    }

    fn last_words(&self) -> &[&str] {
        LAST_WORDS
    }

    fn relative_day_of(&self, word: &str) -> Option<RelativeDay> {
        match fold(word.trim()).as_str() {
            "today" => Some(RelativeDay::Today),
            "tonight" => Some(RelativeDay::Tonight),
            "tomorrow" | "tmrw" | "tmr" => Some(RelativeDay::Tomorrow),
            "yesterday" => Some(RelativeDay::Yesterday),
            _ => None,
        }
    }

    fn part_of_day_of(&self, word: &str) -> Option<PartOfDay> {
        match fold(word.trim()).as_str() {
            "morning" => Some(PartOfDay::Morning),
            "afternoon" => Some(PartOfDay::Afternoon),
            "evening" => Some(PartOfDay::Evening),
            "night" => Some(PartOfDay::Night),
            "noon" | "midday" => Some(PartOfDay::Noon),
            "midnight" => Some(PartOfDay::Midnight),
            _ => None,
        }
    }

    fn duration_unit_of(&self, word: &str) -> Option<DurationUnit> {
        match fold(word.trim()).as_str() {
            "minute" | "minutes" | "min" | "mins" => Some(DurationUnit::Minute),
            "hour" | "hours" | "hr" | "hrs" => Some(DurationUnit::Hour),
            "day" | "days" => Some(DurationUnit::Day),
            "week" | "weeks" | "wk" | "wks" => Some(DurationUnit::Week),
            "month" | "months" => Some(DurationUnit::Month),
            _ => None,
        }
    }

    fn weekday_pattern(&self) -> Option<&Regex> {
        Some(&self.weekday)
    }
    fn week_pattern(&self) -> Option<&Regex> {
        Some(&self.week)
    }
    fn bare_week_pattern(&self) -> Option<&Regex> {
        Some(&self.bare_week)
    }
    fn weekend_pattern(&self) -> Option<&Regex> {
        Some(&self.weekend)
    }
    fn relative_day_pattern(&self) -> Option<&Regex> {
        Some(&self.relative_day)
    }
    fn part_of_day_pattern(&self) -> Option<&Regex> {
        Some(&self.part_of_day)
    }
    fn ordinal_day_pattern(&self) -> Option<&Regex> {
        Some(&self.ordinal_day)
    }
    fn weekday_time_pattern(&self) -> Option<&Regex> {
        Some(&self.weekday_time)
    }
    fn from_to_pattern(&self) -> Option<&Regex> {
        Some(&self.from_to)
    }
    fn between_pattern(&self) -> Option<&Regex> {
        Some(&self.between)
    }
    fn time_only_pattern(&self) -> Option<&Regex> {
        Some(&self.time_only)
    }
    fn in_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.in_duration)
    }
    fn by_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.by_duration)
    }
    fn article_duration_pattern(&self) -> Option<&Regex> {
        Some(&self.article_duration)
    }
    fn connector_pattern(&self) -> Option<&Regex> {
        Some(&self.connector)
    }
    fn command_prefix_pattern(&self) -> Option<&Regex> {
        Some(&self.command_prefix)
    }

    fn next_repetition_count(&self, phrase: &str) -> u32 {
        count_occurrences(phrase, NEXT_WORDS)
    }
}
