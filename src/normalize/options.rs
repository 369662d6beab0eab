//! Normalization options and configuration.

use super::RunFallback;

/// Options controlling how a document is normalized.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Process paragraphs on the rayon thread pool
    pub parallel: bool,

    /// Re-pair quote marks across each paragraph
    pub pair_quotes: bool,

    /// Also normalize paragraphs inside table cells
    pub include_tables: bool,

    /// How to write text back when its length changed
    pub run_fallback: RunFallback,

    /// Keep before/after text of every changed paragraph in the report
    pub record_changes: bool,
}

impl NormalizeOptions {
    /// Create new normalize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that process paragraphs one at a time on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable quote pairing.
    pub fn with_quote_pairing(mut self, enabled: bool) -> Self {
        self.pair_quotes = enabled;
        self
    }

    /// Enable or disable table processing.
    pub fn with_tables(mut self, include: bool) -> Self {
        self.include_tables = include;
        self
    }

    /// Set the run fallback mode.
    pub fn with_run_fallback(mut self, fallback: RunFallback) -> Self {
        self.run_fallback = fallback;
        self
    }

    /// Enable or disable change recording.
    pub fn with_change_records(mut self, record: bool) -> Self {
        self.record_changes = record;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            pair_quotes: true,
            include_tables: true,
            run_fallback: RunFallback::Anchored,
            record_changes: true,
        }
    }
}
