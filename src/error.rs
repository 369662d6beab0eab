//! Error types for cnpunct library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cnpunct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, saving, or processing documents.
///
/// The normalization engine itself never fails; every variant here originates
/// at the document store boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document container could not be decoded or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No document store is registered for the given extension.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The path has no extension to select a document store by.
    #[error("File has no extension: {}", .0.display())]
    MissingExtension(PathBuf),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("docx".to_string());
        assert_eq!(err.to_string(), "Unsupported document format: docx");

        let err = Error::MissingExtension(PathBuf::from("notes"));
        assert_eq!(err.to_string(), "File has no extension: notes");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
