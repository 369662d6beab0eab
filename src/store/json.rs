//! JSON document store.

use super::DocumentStore;
use crate::error::Result;
use crate::model::Document;
use std::fs;
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Parse a document from JSON.
pub fn from_json(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

/// Stores documents as serde JSON files.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    format: JsonFormat,
}

impl JsonStore {
    /// Create a store that writes pretty JSON.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format used by [`save`](DocumentStore::save).
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl DocumentStore for JsonStore {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn load(&self, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        from_json(&content)
    }

    fn save(&self, document: &Document, path: &Path) -> Result<()> {
        let json = to_json(document, self.format)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, TextRun};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("通知".to_string());
        doc.add_paragraph(Paragraph::from_runs(vec![
            TextRun::bold("标题"),
            TextRun::new("正文"),
        ]));
        doc
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("通知"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_from_json_keeps_runs() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        let doc = from_json(&json).unwrap();
        assert_eq!(doc, sample());
        assert!(doc.paragraphs[0].runs[0].style.bold);
    }

    #[test]
    fn test_from_json_minimal() {
        let doc = from_json(r#"{"paragraphs":[{"runs":[{"text":"好,"}]}],"tables":[]}"#).unwrap();
        assert_eq!(doc.paragraphs[0].text(), "好,");
        assert!(!doc.paragraphs[0].runs[0].style.has_styling());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            from_json("{not json"),
            Err(crate::error::Error::Json(_))
        ));
    }

    #[test]
    fn test_store_extension() {
        let store = JsonStore::new();
        assert!(store.supports_extension("JSON"));
        assert!(!store.supports_extension("docx"));
    }
}
