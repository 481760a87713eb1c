//! Per-format content extraction.
//!
//! Every routine takes a path to an existing file and returns either plain
//! text or, for spreadsheets, a [`TableSet`]. Decoder errors are surfaced as
//! [`Error::Extraction`](crate::error::Error::Extraction) without being
//! reinterpreted.

pub mod docx;
pub mod epub;
mod package;
pub mod pdf;
pub mod pptx;
pub mod table;
pub mod xlsx;

use crate::error::Result;
use crate::format::FileType;
use std::path::Path;

pub use docx::extract_text_docx;
pub use epub::extract_text_epub;
pub use pdf::extract_text_pdf;
pub use pptx::extract_text_pptx;
pub use table::{CellValue, Row, TableSet};
pub use xlsx::extract_tables_xlsx;

/// What one document yields. The shape is fixed by the format.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Text(String),
    Tables(TableSet),
}

impl Extracted {
    /// Flattens into the string stored in a record's `content` field.
    /// Table sets become compact JSON.
    pub fn into_content(self) -> Result<String> {
        match self {
            Extracted::Text(text) => Ok(text),
            Extracted::Tables(tables) => Ok(serde_json::to_string(&tables)?),
        }
    }
}

pub trait Extractor {
    fn extract(&self, kind: FileType, path: &Path) -> Result<Extracted>;
}

/// Extractor backed by the in-process decoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeExtractor;

impl Extractor for NativeExtractor {
    fn extract(&self, kind: FileType, path: &Path) -> Result<Extracted> {
        match kind {
            FileType::Pdf => extract_text_pdf(path).map(Extracted::Text),
            FileType::Word => extract_text_docx(path).map(Extracted::Text),
            FileType::Excel => extract_tables_xlsx(path).map(Extracted::Tables),
            FileType::PowerPoint => extract_text_pptx(path).map(Extracted::Text),
            FileType::Epub => extract_text_epub(path).map(Extracted::Text),
        }
    }
}
