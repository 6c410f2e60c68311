//! The language-pack contract.
//!
//! A [`LanguagePack`] is an immutable, per-locale bundle of compiled pattern
//! providers and lookup tables. Packs are constructed once (compiling every
//! regex up front) and shared read-only across calls; a pack that lacks a
//! pattern for some category simply never contributes tokens of that kind.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::clock::TimeGrammar;
use crate::token::{DurationUnit, PartOfDay, RelativeDay};

/// Errors raised while constructing a language pack.
///
/// These surface at configuration time only; `parse` itself never fails.
#[derive(Debug, Error)]
pub enum PackError {
    /// A locale pattern failed to compile.
    #[error("invalid {category} pattern: {source}")]
    Pattern {
        category: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl PackError {
    pub(crate) fn pattern(category: &'static str, source: regex::Error) -> Self {
        Self::Pattern { category, source }
    }
}

/// Case-fold and strip diacritics: NFD decomposition, drop combining marks,
/// lowercase. "Sábado" and "sabado" fold to the same key.
pub fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    // Combining Diacritical Marks block covers the marks NFD produces for
    // the supported locales.
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Strip trailing punctuation left on a captured word ("friday," "terça.").
pub fn strip_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '…' || c == '¿' || c == '¡')
}

/// Weekday-name lookup table mapping folded surface strings to the canonical
/// index (Sunday=1 .. Saturday=7).
///
/// Built from a locale's full weekday names plus curated short-form aliases
/// ("seg", "mon", "ter"/"terça"); every entry is stored folded so lookups are
/// case- and diacritic-insensitive.
#[derive(Debug, Clone, Default)]
pub struct WeekdayTable {
    entries: HashMap<String, u8>,
}

impl WeekdayTable {
    /// Build from full weekday names ordered Sunday first.
    pub fn from_names(names: [&str; 7]) -> Self {
        let mut table = Self::default();
        for (i, name) in names.iter().enumerate() {
            table.insert(name, i as u8 + 1);
        }
        table
    }

    /// Register a short-form alias for a canonical index.
    pub fn alias(mut self, alias: &str, index: u8) -> Self {
        self.insert(alias, index);
        self
    }

    fn insert(&mut self, name: &str, index: u8) {
        debug_assert!((1..=7).contains(&index));
        self.entries.insert(fold(name), index);
    }

    /// Look up a surface string, folding case/diacritics and stripping
    /// trailing punctuation first.
    pub fn lookup(&self, word: &str) -> Option<u8> {
        let cleaned = fold(strip_trailing_punctuation(word.trim()));
        self.entries.get(&cleaned).copied()
    }
}

/// Per-locale bundle of pattern providers and lookup tables.
///
/// Required methods supply the vocabulary every locale must have; the
/// pattern hooks are optional and default to "no match". Pattern capture
/// group names are part of the contract:
///
/// - weekday pattern: `modifier` (optional), `weekday` (required), and
///   optionally `postmod` for locales placing the qualifier after the name
/// - weekend pattern: `modifier`/`post` optional; the full match is checked
///   against the next-vocabulary
/// - part-of-day pattern: first non-empty group named `word`, `word2` or
///   `word3` is the daypart word; otherwise the full match is used
/// - ordinal pattern: any capture group carrying a run of digits
/// - inline weekday+time pattern: every capture group is tested against both
///   the weekday table and the time grammar
/// - from-to / between patterns: `a` and `b` are the endpoints, `wd` an
///   optional leading weekday, `range` the sub-span of the range itself
/// - time-only pattern: `word` for literal noon/midnight, `cued` or `time`
///   for digit forms
/// - duration patterns: `value` and `unit` (`value` absent for the article
///   form, which means 1)
pub trait LanguagePack: Send + Sync {
    /// Weekday surface-string table for this locale.
    fn weekday_table(&self) -> &WeekdayTable;

    /// Time-of-day grammar for this locale.
    fn time_grammar(&self) -> &TimeGrammar;

    /// Vocabulary marking the current week/day ("this", "esta").
    fn this_words(&self) -> &[&str];

    /// Vocabulary marking the following week/day ("next", "que vem").
    fn next_words(&self) -> &[&str];

    /// Vocabulary marking the preceding week/day ("last", "pasada").
    fn last_words(&self) -> &[&str];

    /// Classify a relative-day word ("tomorrow", "ontem").
    fn relative_day_of(&self, word: &str) -> Option<RelativeDay>;

    /// Classify a daypart word ("morning", "tarde").
    fn part_of_day_of(&self, word: &str) -> Option<PartOfDay>;

    /// Classify a duration unit word ("minutes", "semanas").
    fn duration_unit_of(&self, word: &str) -> Option<DurationUnit>;

    fn weekday_pattern(&self) -> Option<&Regex> {
        None
    }
    fn week_pattern(&self) -> Option<&Regex> {
        None
    }
    fn bare_week_pattern(&self) -> Option<&Regex> {
        None
    }
    fn weekend_pattern(&self) -> Option<&Regex> {
        None
    }
    fn relative_day_pattern(&self) -> Option<&Regex> {
        None
    }
    fn part_of_day_pattern(&self) -> Option<&Regex> {
        None
    }
    fn ordinal_day_pattern(&self) -> Option<&Regex> {
        None
    }
    fn weekday_time_pattern(&self) -> Option<&Regex> {
        None
    }
    fn from_to_pattern(&self) -> Option<&Regex> {
        None
    }
    fn between_pattern(&self) -> Option<&Regex> {
        None
    }
    fn time_only_pattern(&self) -> Option<&Regex> {
        None
    }
    fn in_duration_pattern(&self) -> Option<&Regex> {
        None
    }
    fn by_duration_pattern(&self) -> Option<&Regex> {
        None
    }
    fn article_duration_pattern(&self) -> Option<&Regex> {
        None
    }
    fn connector_pattern(&self) -> Option<&Regex> {
        None
    }
    fn command_prefix_pattern(&self) -> Option<&Regex> {
        None
    }

    /// Locales whose relative-day and daypart vocabularies collide (Spanish
    /// "mañana") opt in to dropping a relative-day match that falls entirely
    /// inside a daypart match.
    fn suppress_relative_day_inside_part_of_day(&self) -> bool {
        false
    }

    /// Whether a phrase contains this locale's "this" vocabulary.
    fn signals_this(&self, phrase: &str) -> bool {
        contains_any(phrase, self.this_words())
    }

    /// Whether a phrase contains this locale's "next" vocabulary.
    fn signals_next(&self, phrase: &str) -> bool {
        contains_any(phrase, self.next_words())
    }

    /// Whether a phrase contains this locale's "last" vocabulary.
    fn signals_last(&self, phrase: &str) -> bool {
        contains_any(phrase, self.last_words())
    }

    /// Number of repeated "next" markers before "week" in a week phrase
    /// ("next next week" counts 2). The default recognizes a single marker.
    fn next_repetition_count(&self, phrase: &str) -> u32 {
        if self.signals_next(phrase) {
            1
        } else {
            0
        }
    }
}

/// Count the total occurrences of any of `words` in `phrase`, folded.
///
/// Shared by the locale packs' `next_repetition_count` overrides.
pub(crate) fn count_occurrences(phrase: &str, words: &[&str]) -> u32 {
    let folded = fold(phrase);
    words
        .iter()
        .map(|w| folded.matches(fold(w).as_str()).count() as u32)
        .sum()
}

fn contains_any(phrase: &str, words: &[&str]) -> bool {
    let folded = fold(phrase);
    words.iter().any(|w| folded.contains(fold(w).as_str()))
}

/// Strip a locale's command prefix ("remind me to", "agendar") from the
/// head of an utterance, for downstream layers that want the bare request.
pub fn trim_command_prefix<'a>(pack: &dyn LanguagePack, text: &'a str) -> &'a str {
    match pack.command_prefix_pattern() {
        Some(pattern) => match pattern.find(text) {
            Some(m) if m.start() == 0 => text[m.end()..].trim_start(),
            _ => text,
        },
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_case_and_diacritics() {
        assert_eq!(fold("Sábado"), "sabado");
        assert_eq!(fold("TERÇA"), "terca");
        assert_eq!(fold("Miércoles"), "miercoles");
        assert_eq!(fold("monday"), "monday");
    }

    #[test]
    fn strip_trailing_punctuation_keeps_inner_marks() {
        assert_eq!(strip_trailing_punctuation("friday,"), "friday");
        assert_eq!(strip_trailing_punctuation("terça-feira."), "terça-feira");
        assert_eq!(strip_trailing_punctuation("ok"), "ok");
    }

    #[test]
    fn weekday_table_folds_on_lookup() {
        let table = WeekdayTable::from_names([
            "domingo",
            "segunda-feira",
            "terça-feira",
            "quarta-feira",
            "quinta-feira",
            "sexta-feira",
            "sábado",
        ])
        .alias("seg", 2)
        .alias("terça", 3);

        assert_eq!(table.lookup("Sábado"), Some(7));
        assert_eq!(table.lookup("TERÇA-FEIRA"), Some(3));
        assert_eq!(table.lookup("terca"), Some(3));
        assert_eq!(table.lookup("seg,"), Some(2));
        assert_eq!(table.lookup("qualquer"), None);
    }

    #[test]
    fn count_occurrences_sums_repeats() {
        assert_eq!(count_occurrences("next next week", &["next"]), 2);
        assert_eq!(
            count_occurrences("próxima próxima semana", &["próxima", "próximo"]),
            2
        );
        assert_eq!(count_occurrences("this week", &["next"]), 0);
    }
}
