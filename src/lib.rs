//! Temporal phrase extraction and resolution for chat-style text.
//!
//! Given a short informal utterance ("move game to next Friday",
//! "jantar amanhã às 20h"), the pipeline finds the time-related spans,
//! arbitrates overlapping readings, and resolves them against an
//! explicit reference instant into a [`TemporalContext`].
//!
//! ## Pipeline
//!
//! - [`LanguagePack`] - Per-locale patterns and vocabulary
//!   ([`EnglishPack`], [`PortuguesePack`], [`SpanishPack`])
//! - [`TokenDetector`] - Runs every pattern category, yields candidate
//!   [`TemporalToken`]s
//! - [`select_tokens`] - Priority/containment deduplication
//! - [`interpret`] - Ordered resolution into an instant or range
//! - [`TemporalParser`] / [`parse`] - The assembled pipeline
//!
//! ## Hosts
//!
//! - [`FallbackRecognizer`] - Seam for a platform date recognizer
//!   ("March 5th", "05/03/2026") the regex layer does not cover
//! - [`Preferences`] - Start-of-week, daypart anchor hours, week
//!   semantics
//!
//! The pipeline is a pure function of its inputs: no clock reads, no
//! I/O, no shared mutable state. Packs compile their patterns once and
//! are safely shared across threads.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use temporal_phrase::{parse, EnglishPack, Preferences};
//!
//! let pack = EnglishPack::new().unwrap();
//! let reference = NaiveDate::from_ymd_opt(2025, 9, 11) // a Thursday
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let outcome = parse("move game to next Friday", reference, &pack, &Preferences::default());
//! assert_eq!(outcome.context.instant.to_string(), "2025-09-19 10:00:00");
//! ```

mod clock;
mod context;
mod detector;
mod fallback;
mod interpreter;
mod locale;
mod pack;
mod parser;
mod preferences;
mod selector;
mod token;

pub use clock::{propagate_meridiem, ClockTime, Meridiem, ParsedTime, TimeGrammar};
pub use context::{DateInterval, TemporalContext};
pub use detector::TokenDetector;
pub use fallback::{FallbackRecognizer, NoFallback, RecognizedSpan};
pub use interpreter::interpret;
pub use locale::{EnglishPack, PortuguesePack, SpanishPack};
pub use pack::{fold, strip_trailing_punctuation, trim_command_prefix, LanguagePack, PackError, WeekdayTable};
pub use parser::{parse, ParseOutcome, TemporalParser};
pub use preferences::Preferences;
pub use selector::select_tokens;
pub use token::{
    DateParts, DurationUnit, OffsetMode, PartOfDay, RelativeDay, Span, TemporalToken, TokenKind,
    WeekRef, WeekdayModifier,
};

#[cfg(test)]
mod tests {
    mod locales;
    mod properties;
    mod scenarios;
}
