//! Host-supplied recognizer for calendar dates the regex layer does not
//! cover ("March 5th", "05/03/2026", ...). The pipeline treats every
//! recognized span as a low-priority absolute date unless it turns out
//! to be a plain clock time or a relative phrase the packs already
//! handle.

use crate::token::{DateParts, Span};

/// One span the recognizer claims, with the calendar date it read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizedSpan {
    pub span: Span,
    pub date: DateParts,
}

impl RecognizedSpan {
    pub fn new(span: Span, date: DateParts) -> Self {
        RecognizedSpan { span, date }
    }
}

/// Boundary to an external date recognizer. Implementations must be
/// deterministic: the same text always yields the same spans.
pub trait FallbackRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedSpan>;
}

/// Recognizes nothing. The default when the host wires no recognizer in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFallback;

impl FallbackRecognizer for NoFallback {
    fn recognize(&self, _text: &str) -> Vec<RecognizedSpan> {
        Vec::new()
    }
}

pub(crate) static NO_FALLBACK: NoFallback = NoFallback;
