//! The pipeline entry point: detect, select, interpret.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::context::TemporalContext;
use crate::detector::TokenDetector;
use crate::fallback::{FallbackRecognizer, NO_FALLBACK};
use crate::pack::LanguagePack;
use crate::preferences::Preferences;
use crate::selector::select_tokens;
use crate::token::TemporalToken;

/// The surviving tokens and the interpretation drawn from them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub tokens: Vec<TemporalToken>,
    pub context: TemporalContext,
}

/// A configured parsing pipeline for one locale.
///
/// Construction is cheap; the expensive part (pattern compilation) is
/// already done inside the pack. A parser is read-only and can be shared
/// across threads.
///
/// ```
/// use chrono::NaiveDate;
/// use temporal_phrase::{EnglishPack, TemporalParser};
///
/// let pack = EnglishPack::new().unwrap();
/// let parser = TemporalParser::new(&pack);
/// let reference = NaiveDate::from_ymd_opt(2025, 9, 11)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let outcome = parser.parse("lunch tomorrow at noon", reference);
/// assert_eq!(outcome.context.instant.to_string(), "2025-09-12 12:00:00");
/// ```
pub struct TemporalParser<'a> {
    pack: &'a dyn LanguagePack,
    fallback: &'a dyn FallbackRecognizer,
    preferences: Preferences,
}

impl<'a> TemporalParser<'a> {
    pub fn new(pack: &'a dyn LanguagePack) -> Self {
        Self {
            pack,
            fallback: &NO_FALLBACK,
            preferences: Preferences::default(),
        }
    }

    /// Wire in a host-supplied date recognizer.
    pub fn with_fallback(mut self, fallback: &'a dyn FallbackRecognizer) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Run the full pipeline over one utterance.
    pub fn parse(&self, text: &str, reference: NaiveDateTime) -> ParseOutcome {
        let candidates = TokenDetector::new(self.pack, self.fallback).detect(text);
        let selected = select_tokens(candidates);
        debug!(text, kept = selected.len(), "tokens selected");
        let tokens = selected.clone();
        let context = crate::interpreter::interpret(selected, reference, &self.preferences);
        ParseOutcome { tokens, context }
    }
}

/// One-shot convenience over [`TemporalParser`] with no fallback
/// recognizer.
pub fn parse(
    text: &str,
    reference: NaiveDateTime,
    pack: &dyn LanguagePack,
    preferences: &Preferences,
) -> ParseOutcome {
    TemporalParser::new(pack)
        .with_preferences(preferences.clone())
        .parse(text, reference)
}
