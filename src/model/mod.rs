//! Document model types.
//!
//! This module defines the document container that normalization operates on:
//! body paragraphs and tables, each paragraph an ordered list of formatted
//! text runs. Stores load into and save from this model.

mod document;
mod paragraph;
mod table;

pub use document::{Document, Metadata};
pub use paragraph::{Alignment, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use table::{Table, TableCell, TableRow};
