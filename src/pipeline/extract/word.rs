//! Word (.docx) text extraction via docx-rs.
//!
//! The body is flattened into one text blob (paragraphs joined by newlines,
//! table cells read in row order) and then split into non-blank lines.
//! Tabs and explicit breaks inside runs are kept.

use crate::content::ContentLine;
use crate::error::StageError;

#[cfg(feature = "docx")]
use crate::content::text_lines_or_placeholder;

/// Extract the non-blank lines of a Word document.
#[cfg(feature = "docx")]
pub fn extract(bytes: &[u8]) -> Result<Vec<ContentLine>, StageError> {
    let blob = body_text(bytes)?;
    tracing::debug!("Word body: {} chars", blob.len());
    Ok(text_lines_or_placeholder(&blob))
}

/// Stub when the `docx` feature is not enabled.
#[cfg(not(feature = "docx"))]
pub fn extract(_bytes: &[u8]) -> Result<Vec<ContentLine>, StageError> {
    Err(StageError::WordUnavailable)
}

#[cfg(feature = "docx")]
fn body_text(bytes: &[u8]) -> Result<String, StageError> {
    use docx_rs::{read_docx, DocumentChild};

    let docx = read_docx(bytes).map_err(|e| StageError::Word(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => paragraphs.push(paragraph_text(p)),
            DocumentChild::Table(t) => table_text(t, &mut paragraphs),
            _ => {}
        }
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(feature = "docx")]
fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    push_children(&paragraph.children, &mut out);
    out
}

#[cfg(feature = "docx")]
fn push_children(children: &[docx_rs::ParagraphChild], out: &mut String) {
    use docx_rs::{ParagraphChild, RunChild};

    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for rc in &run.children {
                    match rc {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}

#[cfg(feature = "docx")]
fn table_text(table: &docx_rs::Table, paragraphs: &mut Vec<String>) {
    use docx_rs::{TableCellContent, TableChild, TableRowChild};

    for row in &table.rows {
        #[allow(irrefutable_let_patterns)]
        let TableChild::TableRow(row) = row else {
            continue;
        };
        for cell in &row.cells {
            #[allow(irrefutable_let_patterns)]
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                    TableCellContent::Table(t) => table_text(t, paragraphs),
                    _ => {}
                }
            }
        }
    }
}
