use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The closed set of document kinds the pipeline knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "Word")]
    Word,
    #[serde(rename = "Excel")]
    Excel,
    #[serde(rename = "PowerPoint")]
    PowerPoint,
    #[serde(rename = "EPUB")]
    Epub,
}

pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".pdf", ".docx", ".xlsx", ".pptx", ".epub"];

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Pdf,
        FileType::Word,
        FileType::Excel,
        FileType::PowerPoint,
        FileType::Epub,
    ];

    /// Dotted extension, e.g. `.docx`.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Pdf => ".pdf",
            FileType::Word => ".docx",
            FileType::Excel => ".xlsx",
            FileType::PowerPoint => ".pptx",
            FileType::Epub => ".epub",
        }
    }

    /// Label written to the `file_type` field of a record.
    pub fn label(self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Word => "Word",
            FileType::Excel => "Excel",
            FileType::PowerPoint => "PowerPoint",
            FileType::Epub => "EPUB",
        }
    }

    /// Exact, case-sensitive suffix match on the file name. No content sniffing.
    pub fn from_path(path: &Path) -> Option<FileType> {
        let name = path.file_name()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|ft| name.ends_with(ft.extension()))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
