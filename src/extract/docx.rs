use crate::error::{Error, Result};
use crate::format::FileType;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use std::path::Path;

/// Joins the text of every body-level paragraph with a single space.
/// Tables, headers and footers are not read.
pub fn extract_text_docx(path: &Path) -> Result<String> {
    let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let docx = docx_rs::read_docx(&data).map_err(|e| Error::extraction(FileType::Word, e))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join(" ").trim().to_string())
}

fn paragraph_text(p: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&p.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
