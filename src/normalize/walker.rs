//! Paragraph and document traversal.
//!
//! Body paragraphs are visited first, then every table cell paragraph in
//! table, row, cell order. Each paragraph is handled independently, so the
//! walk can fan out over the rayon pool; results are merged back in document
//! order.

use super::quotes::pair_quotes;
use super::redistribute::{redistribute_with, Redistribution};
use super::rules::rewrite_protected;
use super::NormalizeOptions;
use crate::model::{Document, Paragraph};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

const PREVIEW_CHARS: usize = 50;

/// Where a paragraph sits in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Top-level paragraph
    Body { index: usize },
    /// Paragraph inside a table cell
    TableCell {
        table: usize,
        row: usize,
        cell: usize,
        paragraph: usize,
    },
}

impl Location {
    /// Check if the paragraph is inside a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Location::TableCell { .. })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Body { index } => write!(f, "paragraph {}", index + 1),
            Location::TableCell {
                table,
                row,
                cell,
                paragraph,
            } => write!(
                f,
                "table {} row {} cell {} paragraph {}",
                table + 1,
                row + 1,
                cell + 1,
                paragraph + 1
            ),
        }
    }
}

/// Before and after text of one changed paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParagraphChange {
    pub location: Location,
    pub before: String,
    pub after: String,
}

/// What happened to a single paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphOutcome {
    /// Number of runs whose text the simple rules changed
    pub runs_rewritten: usize,
    /// Whether quote pairing changed the paragraph text
    pub quotes_changed: bool,
    /// Whether redistribution had to use the length-mismatch fallback
    pub used_fallback: bool,
}

impl ParagraphOutcome {
    /// Check if the paragraph changed at all.
    pub fn changed(&self) -> bool {
        self.runs_rewritten > 0 || self.quotes_changed
    }
}

/// Aggregate result of normalizing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Changed top-level paragraphs
    pub paragraphs_changed: usize,
    /// Changed paragraphs inside table cells
    pub table_cells_changed: usize,
    /// Runs whose text the simple rules changed
    pub runs_rewritten: usize,
    /// Paragraphs whose quotes were re-paired
    pub quote_paragraphs: usize,
    /// Paragraphs written back through the length-mismatch fallback
    pub fallback_redistributions: usize,
    /// Per-paragraph changes, in document order
    pub changes: Vec<ParagraphChange>,
}

impl NormalizeReport {
    /// The `(changed paragraphs, changed table cells)` pair.
    pub fn counts(&self) -> (usize, usize) {
        (self.paragraphs_changed, self.table_cells_changed)
    }

    /// Total number of changed paragraphs, body and table.
    pub fn total_changed(&self) -> usize {
        self.paragraphs_changed + self.table_cells_changed
    }

    /// Check if nothing changed.
    pub fn is_unchanged(&self) -> bool {
        self.total_changed() == 0
    }

    fn record(&mut self, location: Location, outcome: ParagraphOutcome) {
        if !outcome.changed() {
            return;
        }
        if location.is_table() {
            self.table_cells_changed += 1;
        } else {
            self.paragraphs_changed += 1;
        }
        self.runs_rewritten += outcome.runs_rewritten;
        if outcome.quotes_changed {
            self.quote_paragraphs += 1;
        }
        if outcome.used_fallback {
            self.fallback_redistributions += 1;
        }
    }
}

/// Drives the punctuation rules over paragraphs and documents.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one paragraph in place. Returns whether it changed.
    pub fn process_paragraph(&self, paragraph: &mut Paragraph) -> bool {
        self.normalize_paragraph(paragraph).changed()
    }

    /// Normalize one paragraph in place and describe what happened.
    ///
    /// Blank paragraphs and paragraphs without runs are skipped. Each run is
    /// rewritten on its own; quotes are then paired over the whole paragraph
    /// and written back across the runs.
    pub fn normalize_paragraph(&self, paragraph: &mut Paragraph) -> ParagraphOutcome {
        let mut outcome = ParagraphOutcome::default();
        if paragraph.runs.is_empty() || paragraph.is_blank() {
            return outcome;
        }

        for run in &mut paragraph.runs {
            let rewritten = rewrite_protected(&run.text);
            if rewritten != run.text {
                run.text = rewritten;
                outcome.runs_rewritten += 1;
            }
        }

        if self.options.pair_quotes {
            let text = paragraph.text();
            let paired = pair_quotes(&text);
            if paired != text {
                let path = redistribute_with(&mut paragraph.runs, &paired, self.options.run_fallback);
                outcome.quotes_changed = true;
                outcome.used_fallback = matches!(path, Redistribution::Fallback(_));
            }
        }

        outcome
    }

    /// Normalize a whole document in place.
    pub fn process(&self, document: &mut Document) -> NormalizeReport {
        let targets = collect_targets(document, self.options.include_tables);
        let record = self.options.record_changes;

        let visit = |(location, paragraph): (Location, &mut Paragraph)| {
            let before = if record { Some(paragraph.text()) } else { None };
            let outcome = self.normalize_paragraph(paragraph);
            let change = match before {
                Some(before) if outcome.changed() => Some(ParagraphChange {
                    location,
                    before,
                    after: paragraph.text(),
                }),
                _ => None,
            };
            if outcome.changed() {
                log::debug!("Normalized {}: {}", location, preview(&paragraph.text()));
            }
            (location, outcome, change)
        };

        let results: Vec<_> = if self.options.parallel {
            targets.into_par_iter().map(visit).collect()
        } else {
            targets.into_iter().map(visit).collect()
        };

        let mut report = NormalizeReport::default();
        for (location, outcome, change) in results {
            report.record(location, outcome);
            report.changes.extend(change);
        }

        log::info!(
            "Normalized {} paragraphs and {} table cell paragraphs ({} runs rewritten, {} quote fixes)",
            report.paragraphs_changed,
            report.table_cells_changed,
            report.runs_rewritten,
            report.quote_paragraphs
        );
        report
    }

    /// Report what [`process`](Self::process) would change, leaving the
    /// document untouched.
    pub fn analyze(&self, document: &Document) -> NormalizeReport {
        let mut scratch = document.clone();
        let normalizer = Normalizer::new(self.options.clone().with_change_records(true));
        normalizer.process(&mut scratch)
    }
}

fn collect_targets(document: &mut Document, include_tables: bool) -> Vec<(Location, &mut Paragraph)> {
    let mut targets: Vec<(Location, &mut Paragraph)> = document
        .paragraphs
        .iter_mut()
        .enumerate()
        .map(|(index, p)| (Location::Body { index }, p))
        .collect();

    if !include_tables {
        return targets;
    }

    for (t, table) in document.tables.iter_mut().enumerate() {
        for (r, row) in table.rows.iter_mut().enumerate() {
            for (c, cell) in row.cells.iter_mut().enumerate() {
                for (p, paragraph) in cell.paragraphs.iter_mut().enumerate() {
                    let location = Location::TableCell {
                        table: t,
                        row: r,
                        cell: c,
                        paragraph: p,
                    };
                    targets.push((location, paragraph));
                }
            }
        }
    }
    targets
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Table, TableCell, TableRow, TextRun, TextStyle};
    use crate::normalize::RunFallback;

    fn sequential() -> Normalizer {
        Normalizer::new(NormalizeOptions::sequential())
    }

    #[test]
    fn test_blank_paragraph_skipped() {
        let n = sequential();
        let mut empty = Paragraph::new();
        let mut spaces = Paragraph::with_text("   ");
        assert!(!n.process_paragraph(&mut empty));
        assert!(!n.process_paragraph(&mut spaces));
        assert_eq!(spaces.text(), "   ");
    }

    #[test]
    fn test_unchanged_paragraph() {
        let mut p = Paragraph::with_text("已经规范的文本。");
        assert!(!sequential().process_paragraph(&mut p));
    }

    #[test]
    fn test_runs_rewritten_independently() {
        let mut p = Paragraph::from_runs(vec![
            TextRun::bold("注意:"),
            TextRun::new("Plain (text)"),
        ]);
        let outcome = sequential().normalize_paragraph(&mut p);

        assert_eq!(outcome.runs_rewritten, 1);
        assert_eq!(p.runs[0].text, "注意：");
        assert_eq!(p.runs[1].text, "Plain (text)");
        assert!(p.runs[0].style.bold);
    }

    #[test]
    fn test_quotes_across_runs() {
        let mut p = Paragraph::from_runs(vec![
            TextRun::new("他说\""),
            TextRun::italic("好"),
            TextRun::new("\"。"),
        ]);
        let outcome = sequential().normalize_paragraph(&mut p);

        assert!(outcome.quotes_changed);
        assert!(!outcome.used_fallback);
        assert_eq!(p.runs[0].text, "他说\u{201C}");
        assert_eq!(p.runs[1].text, "好");
        assert_eq!(p.runs[2].text, "\u{201D}。");
        assert!(p.runs[1].style.italic);
    }

    #[test]
    fn test_quote_pairing_disabled() {
        let n = Normalizer::new(NormalizeOptions::sequential().with_quote_pairing(false));
        let mut p = Paragraph::with_text("\"a\"");
        assert!(!n.process_paragraph(&mut p));
        assert_eq!(p.text(), "\"a\"");
    }

    #[test]
    fn test_ellipsis_stays_in_its_run() {
        // Length changes happen inside a run; run boundaries are untouched.
        let mut p = Paragraph::from_runs(vec![
            TextRun::new("他说"),
            TextRun::bold("......"),
            TextRun::new("好."),
        ]);
        sequential().process_paragraph(&mut p);
        assert_eq!(p.runs[1].text, "……");
        assert_eq!(p.runs[2].text, "好。");
        assert_eq!(p.runs.len(), 3);
    }

    #[test]
    fn test_per_run_chinese_gate() {
        // The colon run has no ideograph of its own, so it stays half-width
        // even though the paragraph is Chinese.
        let mut p = Paragraph::from_runs(vec![TextRun::new("注意"), TextRun::new(": ok")]);
        sequential().process_paragraph(&mut p);
        assert_eq!(p.text(), "注意: ok");
    }

    fn sample_document() -> Document {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("第一段,内容."));
        doc.add_paragraph(Paragraph::with_text("No change here."));
        doc.add_paragraph(Paragraph::with_text("他说\"好\"。"));

        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["表格:内容", "plain"]));
        table.add_row(TableRow::new(vec![
            TableCell::text("无需修改"),
            TableCell::with_paragraphs(vec![
                Paragraph::with_text("甲,乙"),
                Paragraph::with_text("丙?"),
            ]),
        ]));
        doc.add_table(table);
        doc
    }

    #[test]
    fn test_process_document_counts() {
        let mut doc = sample_document();
        let report = sequential().process(&mut doc);

        assert_eq!(report.counts(), (2, 3));
        assert_eq!(report.quote_paragraphs, 1);
        assert_eq!(report.changes.len(), 5);
        assert_eq!(report.changes[0].location, Location::Body { index: 0 });
        assert_eq!(report.changes[0].after, "第一段，内容。");
        assert_eq!(
            report.changes[4].location,
            Location::TableCell {
                table: 0,
                row: 1,
                cell: 1,
                paragraph: 1
            }
        );
        assert_eq!(doc.tables[0].rows[0].cells[0].plain_text(), "表格：内容");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut a = sample_document();
        let mut b = sample_document();
        let seq = sequential().process(&mut a);
        let par = Normalizer::new(NormalizeOptions::default()).process(&mut b);

        assert_eq!(seq, par);
        assert_eq!(a, b);
    }

    #[test]
    fn test_skip_tables() {
        let mut doc = sample_document();
        let n = Normalizer::new(NormalizeOptions::sequential().with_tables(false));
        let report = n.process(&mut doc);

        assert_eq!(report.counts(), (2, 0));
        assert_eq!(doc.tables[0].rows[0].cells[0].plain_text(), "表格:内容");
    }

    #[test]
    fn test_change_records_disabled() {
        let mut doc = sample_document();
        let n = Normalizer::new(NormalizeOptions::sequential().with_change_records(false));
        let report = n.process(&mut doc);

        assert_eq!(report.counts(), (2, 3));
        assert!(report.changes.is_empty());
    }

    #[test]
    fn test_analyze_leaves_document_untouched() {
        let doc = sample_document();
        let n = Normalizer::new(NormalizeOptions::sequential().with_change_records(false));
        let report = n.analyze(&doc);

        assert_eq!(report.total_changed(), 5);
        assert_eq!(report.changes.len(), 5);
        assert_eq!(doc, sample_document());
    }

    #[test]
    fn test_styles_survive_document_walk() {
        let style = TextStyle {
            bold: true,
            font_name: Some("SimSun".to_string()),
            ..Default::default()
        };
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::from_runs(vec![
            TextRun::styled("标题:", style.clone()),
            TextRun::new("正文."),
        ]));
        let n = Normalizer::new(NormalizeOptions::sequential().with_run_fallback(RunFallback::FirstRun));
        n.process(&mut doc);

        assert_eq!(doc.paragraphs[0].runs[0].style, style);
        assert_eq!(doc.paragraphs[0].text(), "标题：正文。");
    }

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Body { index: 0 }.to_string(), "paragraph 1");
        let cell = Location::TableCell {
            table: 1,
            row: 0,
            cell: 2,
            paragraph: 0,
        };
        assert_eq!(cell.to_string(), "table 2 row 1 cell 3 paragraph 1");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "字".repeat(60);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(preview("短"), "短");
    }
}
