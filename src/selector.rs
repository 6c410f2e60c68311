//! Containment-based deduplication over detected tokens.
//!
//! Detection runs every category independently, so "next Friday at 5pm"
//! yields a weekday inside a weekday ("Friday" inside "next Friday"), a
//! time inside a cued time, and so on. The selector keeps the widest,
//! highest-priority reading of every region.

use tracing::trace;

use crate::token::TemporalToken;

/// Order candidates (start ascending, priority descending, length
/// descending) and drop any token whose span is fully covered by an
/// already-kept token of equal or higher priority.
///
/// Partial overlaps survive: two tokens that merely touch both carry
/// information and both are kept.
pub fn select_tokens(mut tokens: Vec<TemporalToken>) -> Vec<TemporalToken> {
    tokens.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.priority().cmp(&a.priority()))
            .then_with(|| b.span.len.cmp(&a.span.len))
    });

    let mut kept: Vec<TemporalToken> = Vec::with_capacity(tokens.len());
    for candidate in tokens {
        let covered = kept.iter().any(|k| {
            k.span.intersection_len(&candidate.span) == candidate.span.len
                && k.priority() >= candidate.priority()
        });
        if covered {
            trace!(text = candidate.text.as_str(), "token covered, dropped");
        } else {
            kept.push(candidate);
        }
    }
    kept
}
