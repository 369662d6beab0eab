//! Document-level types.

use super::{Paragraph, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rich-text document: body paragraphs plus tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Top-level body paragraphs, in reading order
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,

    /// Tables, in reading order
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            paragraphs: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Add a body paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Number of body paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of paragraphs nested in table cells.
    pub fn table_paragraph_count(&self) -> usize {
        self.tables.iter().map(Table::paragraph_count).sum()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .chain(self.tables.iter().map(Table::plain_text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_paragraph_count(), 0);
    }

    #[test]
    fn test_document_plain_text() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("第一段"));
        doc.add_paragraph(Paragraph::with_text("第二段"));
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["甲", "乙"]));
        doc.add_table(table);

        assert_eq!(doc.plain_text(), "第一段\n第二段\n甲\t乙");
        assert_eq!(doc.table_paragraph_count(), 2);
    }
}
