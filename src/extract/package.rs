//! Zip container and XML helpers shared by the OOXML and EPUB readers.

use crate::error::{Error, Result};
use crate::format::FileType;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub(crate) struct Package {
    format: FileType,
    archive: ZipArchive<File>,
}

impl Package {
    pub(crate) fn open(format: FileType, path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let archive = ZipArchive::new(file).map_err(|e| Error::extraction(format, e))?;
        Ok(Self { format, archive })
    }

    pub(crate) fn format(&self) -> FileType {
        self.format
    }

    pub(crate) fn read(&mut self, name: &str) -> Result<Vec<u8>> {
        let format = self.format;
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|e| Error::extraction(format, format!("{name}: {e}")))?;
        // The declared size is untrusted, so the buffer grows as data arrives.
        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .map_err(|e| Error::extraction(format, e))?;
        Ok(buf)
    }

    /// Parses an OPC relationships part into `Id -> resolved part name`.
    /// Targets are resolved against `base_dir`; external targets are skipped.
    pub(crate) fn relationships(
        &mut self,
        rels_name: &str,
        base_dir: &str,
    ) -> Result<HashMap<String, String>> {
        let xml = self.read(rels_name)?;
        let mut rels = HashMap::new();
        for_each_element(self.format, &xml, |e| {
            if e.local_name().as_ref() != b"Relationship" {
                return;
            }
            if attr(e, b"TargetMode").as_deref() == Some("External") {
                return;
            }
            if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                rels.insert(id, resolve_part(base_dir, &target));
            }
        })?;
        Ok(rels)
    }
}

/// Directory portion of a part name, including the trailing slash.
pub(crate) fn part_dir(part: &str) -> &str {
    match part.rfind('/') {
        Some(i) => &part[..=i],
        None => "",
    }
}

/// Resolves `target` relative to `base_dir`, collapsing `.` and `..`.
/// A leading `/` makes the target package-absolute.
pub(crate) fn resolve_part(base_dir: &str, target: &str) -> String {
    let joined = match target.strip_prefix('/') {
        Some(abs) => abs.to_string(),
        None => format!("{base_dir}{target}"),
    };
    let mut segments: Vec<&str> = Vec::new();
    for seg in joined.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Looks up an attribute by its full (possibly prefixed) name.
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Looks up an attribute by local name, requiring a namespace prefix.
/// Distinguishes `r:id` from a bare `id`.
pub(crate) fn prefixed_attr(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.prefix().is_some() && a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Calls `f` for every start and empty element in document order.
pub(crate) fn for_each_element<F>(format: FileType, xml: &[u8], mut f: F) -> Result<()>
where
    F: FnMut(&BytesStart<'_>),
{
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::extraction(format, e))?
        {
            Event::Start(e) | Event::Empty(e) => f(&e),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}
