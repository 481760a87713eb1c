use super::package::{self, Package};
use crate::error::{Error, Result};
use crate::format::FileType;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// Walks slides in presentation order and, within each slide, the top-level
/// shapes in stored order. Each shape contributes its text followed by a
/// newline, so a shape without a text body adds a bare newline.
pub fn extract_text_pptx(path: &Path) -> Result<String> {
    let mut pkg = Package::open(FileType::PowerPoint, path)?;

    let mut text = String::new();
    for slide_part in slide_parts(&mut pkg)? {
        let xml = pkg.read(&slide_part)?;
        text.push_str(&slide_text(&xml)?);
    }

    Ok(text.trim().to_string())
}

/// Slide part names in the order of `p:sldIdLst`.
fn slide_parts(pkg: &mut Package) -> Result<Vec<String>> {
    let rels = pkg.relationships(PRESENTATION_RELS, package::part_dir(PRESENTATION_PART))?;
    let xml = pkg.read(PRESENTATION_PART)?;

    let mut rel_ids = Vec::new();
    package::for_each_element(pkg.format(), &xml, |e| {
        if e.local_name().as_ref() == b"sldId" {
            if let Some(id) = package::prefixed_attr(e, b"id") {
                rel_ids.push(id);
            }
        }
    })?;

    rel_ids
        .into_iter()
        .map(|id| {
            rels.get(&id).cloned().ok_or_else(|| {
                Error::extraction(
                    FileType::PowerPoint,
                    format!("slide relationship {id} not found"),
                )
            })
        })
        .collect()
}

struct ShapeText {
    depth: usize,
    has_text_body: bool,
    paragraphs: Vec<String>,
}

/// Text of one slide. Only `p:sp` shapes sitting directly in the shape tree
/// are considered; grouped shapes, pictures and graphic frames are skipped.
pub fn slide_text(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shape: Option<ShapeText> = None;
    let mut out = String::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| Error::extraction(FileType::PowerPoint, e))?;
        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                let in_tree = stack.last().map(Vec::as_slice) == Some(b"spTree".as_slice());
                if let Some(s) = shape.as_mut() {
                    match name.as_slice() {
                        b"txBody" => s.has_text_body = true,
                        b"p" if s.has_text_body => s.paragraphs.push(String::new()),
                        _ => {}
                    }
                } else if in_tree && name == b"sp" {
                    shape = Some(ShapeText {
                        depth: stack.len(),
                        has_text_body: false,
                        paragraphs: Vec::new(),
                    });
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                if let Some(s) = shape.as_mut() {
                    match e.local_name().as_ref() {
                        b"txBody" => s.has_text_body = true,
                        b"p" if s.has_text_body => s.paragraphs.push(String::new()),
                        b"br" => {
                            if let Some(p) = s.paragraphs.last_mut() {
                                p.push('\n');
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(t) => {
                if stack.last().map(Vec::as_slice) == Some(b"t".as_slice()) {
                    if let Some(p) = shape.as_mut().and_then(|s| s.paragraphs.last_mut()) {
                        let unescaped = t
                            .unescape()
                            .map_err(|e| Error::extraction(FileType::PowerPoint, e))?;
                        p.push_str(&unescaped);
                    }
                }
            }
            Event::End(_) => {
                stack.pop();
                if shape.as_ref().is_some_and(|s| s.depth == stack.len()) {
                    if let Some(done) = shape.take() {
                        out.push_str(&done.paragraphs.join("\n"));
                        out.push('\n');
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}
