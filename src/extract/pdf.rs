use crate::error::{Error, Result};
use crate::format::FileType;
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// Concatenates the text of every page in page order, with no separator.
/// Pages without a text layer contribute nothing.
pub fn extract_text_pdf(path: &Path) -> Result<String> {
    let doc = Document::load(path).map_err(|e| Error::extraction(FileType::Pdf, e))?;

    let mut pages = Vec::new();
    for (page_num, _page_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_num])
            .map_err(|e| Error::extraction(FileType::Pdf, e))?;
        pages.push((page_num, page_text));
    }

    Ok(join_pages(pages))
}

/// Only pages with no text at all are dropped; whitespace is kept until the
/// final trim.
fn join_pages(pages: impl IntoIterator<Item = (u32, String)>) -> String {
    let mut text = String::new();
    for (page_num, page_text) in pages {
        if page_text.is_empty() {
            debug!("pdf page {page_num} has no text");
            continue;
        }
        text.push_str(&page_text);
    }
    text.trim().to_string()
}
