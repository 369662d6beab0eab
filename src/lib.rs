//! # cnpunct
//!
//! Chinese punctuation normalization for rich-text documents.
//!
//! This library rewrites Western punctuation in Chinese text into its
//! full-width forms, pairs generic quote marks into directional ones, and
//! writes the result back without disturbing run-level formatting.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> cnpunct::Result<()> {
//!     let (paragraphs, cells) = cnpunct::process_document("in.json", "out.json")?;
//!     println!("{} paragraphs and {} table cells changed", paragraphs, cells);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Protected patterns**: URLs, emails, paths, standard codes and clock times
//!   are never rewritten
//! - **Run-safe**: bold, italic, font and color spans stay where they were
//! - **Quote pairing**: across run boundaries, per paragraph
//! - **Parallel processing**: uses Rayon to fan out over paragraphs
//! - **Pluggable containers**: load and save through [`store::DocumentStore`]

pub mod error;
pub mod model;
pub mod normalize;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Alignment, Document, Metadata, Paragraph, ParagraphStyle, Table, TableCell, TableRow,
    TextRun, TextStyle,
};
pub use normalize::{
    fix_simple_punctuation, normalize_text, pair_quotes, protect, redistribute, restore,
    rewrite_simple, Location, NormalizeOptions, NormalizeReport, Normalizer, ParagraphChange,
    RunFallback,
};
pub use store::{DocumentStore, JsonFormat, JsonStore, StoreRegistry};

use std::path::Path;

/// Normalize one paragraph in place with the default options.
///
/// Returns `true` if any run text changed.
///
/// # Example
///
/// ```
/// use cnpunct::{process_paragraph, Paragraph};
///
/// let mut p = Paragraph::with_text("会议时间:上午9:30,请准时参加.");
/// assert!(process_paragraph(&mut p));
/// assert_eq!(p.text(), "会议时间：上午9:30，请准时参加。");
/// ```
pub fn process_paragraph(paragraph: &mut Paragraph) -> bool {
    Normalizer::default().process_paragraph(paragraph)
}

/// Normalize every paragraph of a document in place with the default options.
pub fn process(document: &mut Document) -> NormalizeReport {
    Normalizer::default().process(document)
}

/// Load a document, normalize it, and save it to `output`.
///
/// The store is chosen by each path's extension. Returns the number of
/// changed body paragraphs and changed table cell paragraphs. Load and save
/// errors are passed through as-is.
///
/// # Example
///
/// ```no_run
/// let (paragraphs, cells) = cnpunct::process_document("draft.json", "fixed.json").unwrap();
/// ```
pub fn process_document<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<(usize, usize)> {
    let report = Cnpunct::new().process_file(input, output)?;
    Ok(report.counts())
}

/// Builder for normalizing documents with custom options.
///
/// # Example
///
/// ```no_run
/// use cnpunct::Cnpunct;
///
/// let report = Cnpunct::new()
///     .sequential()
///     .skip_tables()
///     .process_file("draft.json", "fixed.json")?;
/// println!("{} paragraphs changed", report.paragraphs_changed);
/// # Ok::<(), cnpunct::Error>(())
/// ```
pub struct Cnpunct {
    options: NormalizeOptions,
    registry: StoreRegistry,
}

impl Cnpunct {
    /// Create a new builder with default options and stores.
    pub fn new() -> Self {
        Self {
            options: NormalizeOptions::default(),
            registry: StoreRegistry::with_defaults(),
        }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.with_parallel(false);
        self
    }

    /// Skip quote pairing.
    pub fn without_quotes(mut self) -> Self {
        self.options = self.options.with_quote_pairing(false);
        self
    }

    /// Leave table cell paragraphs alone.
    pub fn skip_tables(mut self) -> Self {
        self.options = self.options.with_tables(false);
        self
    }

    /// Set how length-changing text is written back to runs.
    pub fn with_run_fallback(mut self, fallback: RunFallback) -> Self {
        self.options = self.options.with_run_fallback(fallback);
        self
    }

    /// Replace all normalize options.
    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a custom store registry.
    pub fn with_registry(mut self, registry: StoreRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The normalize options in use.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a document in place.
    pub fn process(&self, document: &mut Document) -> NormalizeReport {
        Normalizer::new(self.options.clone()).process(document)
    }

    /// Report what normalizing a document would change.
    pub fn analyze(&self, document: &Document) -> NormalizeReport {
        Normalizer::new(self.options.clone()).analyze(document)
    }

    /// Load a document from a file.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        self.registry.load(path.as_ref())
    }

    /// Load `input`, normalize it, and save it to `output`.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<NormalizeReport> {
        let output = output.as_ref();
        // Resolve the output store before doing any work.
        self.registry.store_for(output)?;

        let mut document = self.load(input)?;
        let report = self.process(&mut document);
        self.registry.save(&document, output)?;
        Ok(report)
    }

    /// Load a file and report what would change, without writing anything.
    pub fn check_file<P: AsRef<Path>>(&self, input: P) -> Result<NormalizeReport> {
        let document = self.load(input)?;
        Ok(self.analyze(&document))
    }
}

impl Default for Cnpunct {
    fn default() -> Self {
        Self::new()
    }
}
