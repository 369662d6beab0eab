//! Chinese punctuation normalization.
//!
//! The pipeline for one paragraph:
//!
//! 1. [`protect`] shields URLs, emails, paths, standard codes and clock times.
//! 2. [`rewrite_simple`] rules run on each run's unprotected text.
//! 3. [`pair_quotes`] re-pairs quote marks over the whole paragraph.
//! 4. [`redistribute`] writes the paragraph text back across its runs.
//!
//! [`Normalizer`] walks a [`Document`](crate::Document) through these steps.

mod options;
mod protect;
mod quotes;
mod redistribute;
mod rules;
mod walker;

pub use options::NormalizeOptions;
pub use protect::{protect, restore, PatternKind, ProtectedSpan, ProtectedText, Segment};
pub use quotes::{
    pair_quotes, DOUBLE_QUOTE_MARKS, LEFT_DOUBLE_QUOTE, LEFT_SINGLE_QUOTE, RIGHT_DOUBLE_QUOTE,
    RIGHT_SINGLE_QUOTE, SINGLE_QUOTE_MARKS,
};
pub use redistribute::{redistribute, redistribute_with, Redistribution, RunFallback};
pub use rules::{
    contains_cjk, is_cjk_ideograph, rewrite_protected, rewrite_simple, rewrite_with, RuleContext,
    ELLIPSIS, EM_DASH_PAIR, FULLWIDTH_REPLACEMENTS,
};
pub use walker::{Location, NormalizeReport, Normalizer, ParagraphChange, ParagraphOutcome};

/// Fix the simple punctuation of one text unit, leaving protected patterns
/// untouched. This is the per-run step of paragraph processing.
pub fn fix_simple_punctuation(text: &str) -> String {
    rewrite_protected(text)
}

/// Normalize a plain string as if it were a single-run paragraph.
pub fn normalize_text(text: &str) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }
    pair_quotes(&rewrite_protected(text))
}
