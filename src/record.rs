use crate::error::Result;
use crate::format::FileType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One normalized document: the unit written to `<stem>_normalized.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub file_type: FileType,
    pub content: String,
    pub metadata: Metadata,
}

impl Record {
    /// Pretty JSON with `indent` spaces per level. Non-ASCII is written as-is.
    pub fn to_json_pretty(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Wraps extracted content and metadata into a record. `metadata` is moved in,
/// so later changes on the caller's side never leak into the record.
pub fn normalize(file_type: FileType, content: impl Into<String>, metadata: Metadata) -> Record {
    Record {
        file_type,
        content: content.into(),
        metadata,
    }
}

/// Overwrites metadata fields whose argument is present and non-empty.
pub fn enrich<'a>(
    record: &'a mut Record,
    author: Option<&str>,
    date: Option<&str>,
    source: Option<&str>,
) -> &'a mut Record {
    let meta = &mut record.metadata;
    for (slot, value) in [
        (&mut meta.author, author),
        (&mut meta.date, date),
        (&mut meta.source, source),
    ] {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            *slot = Some(v.to_string());
        }
    }
    record
}
