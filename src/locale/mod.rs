//! Built-in language packs.
//!
//! Each pack compiles its full pattern set in `new()`; a compile failure is a
//! configuration error surfaced before any parse runs. The pattern data here
//! is deliberately repetitive - it is the per-locale surface of the
//! [`LanguagePack`](crate::LanguagePack) contract, not shared logic.

mod english;
mod portuguese;
mod spanish;

pub use english::EnglishPack;
pub use portuguese::PortuguesePack;
pub use spanish::SpanishPack;

use regex::Regex;

use crate::pack::PackError;

/// Compile one category pattern, tagging failures with the category name.
pub(crate) fn compile(category: &'static str, pattern: &str) -> Result<Regex, PackError> {
    Regex::new(pattern).map_err(|source| PackError::pattern(category, source))
}
