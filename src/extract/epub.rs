use super::package::{self, Package};
use crate::error::{Error, Result};
use crate::format::FileType;
use percent_encoding::percent_decode_str;
use std::path::Path;

const CONTAINER_PART: &str = "META-INF/container.xml";
const DOCUMENT_MEDIA_TYPE: &str = "application/xhtml+xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// Part name inside the container, already resolved against the package.
    pub part: String,
    pub media_type: String,
}

impl ManifestItem {
    /// XHTML documents, the navigation document included.
    pub fn is_document(&self) -> bool {
        self.media_type == DOCUMENT_MEDIA_TYPE
    }
}

/// Concatenates the raw markup of every content document in manifest order.
/// Documents must be UTF-8.
pub fn extract_text_epub(path: &Path) -> Result<String> {
    let mut pkg = Package::open(FileType::Epub, path)?;
    let opf_part = package_document(&mut pkg)?;
    let opf = pkg.read(&opf_part)?;
    let items = manifest_items(&opf, package::part_dir(&opf_part))?;

    let mut text = String::new();
    for item in items.iter().filter(|i| i.is_document()) {
        let bytes = pkg.read(&item.part)?;
        let doc = String::from_utf8(bytes).map_err(|e| {
            Error::extraction(FileType::Epub, format!("{} is not UTF-8: {e}", item.part))
        })?;
        text.push_str(&doc);
    }

    Ok(text.trim().to_string())
}

/// Part name of the OPF package document named by the first `rootfile`.
fn package_document(pkg: &mut Package) -> Result<String> {
    let xml = pkg.read(CONTAINER_PART)?;
    let mut rootfile = None;
    package::for_each_element(pkg.format(), &xml, |e| {
        if rootfile.is_none() && e.local_name().as_ref() == b"rootfile" {
            rootfile = package::attr(e, b"full-path");
        }
    })?;
    rootfile
        .map(|p| package::resolve_part("", &p))
        .ok_or_else(|| Error::extraction(FileType::Epub, "container.xml names no rootfile"))
}

/// Manifest entries in document order. Hrefs are percent-decoded and resolved
/// against `opf_dir`.
pub fn manifest_items(opf: &[u8], opf_dir: &str) -> Result<Vec<ManifestItem>> {
    let mut items = Vec::new();
    let mut in_manifest = false;
    package::for_each_element(FileType::Epub, opf, |e| match e.local_name().as_ref() {
        b"manifest" => in_manifest = true,
        b"spine" | b"guide" => in_manifest = false,
        b"item" if in_manifest => {
            let Some(href) = package::attr(e, b"href") else {
                return;
            };
            let href = percent_decode_str(&href).decode_utf8_lossy();
            items.push(ManifestItem {
                part: package::resolve_part(opf_dir, &href),
                media_type: package::attr(e, b"media-type").unwrap_or_default(),
            });
        }
        _ => {}
    })?;
    Ok(items)
}
