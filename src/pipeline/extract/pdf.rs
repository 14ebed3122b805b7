//! PDF text extraction via lopdf.
//!
//! Pages are visited in document order. A page contributes a `"Page <n>"`
//! heading followed by its non-blank lines; pages with no extractable text
//! (scans, blank pages) contribute nothing at all. A single blank separator
//! sits *between* text-bearing pages, never after the last one.

use crate::content::ContentLine;
use crate::error::StageError;
use lopdf::Document;
use tracing::debug;

/// Extract the ordered text lines of a PDF.
pub fn extract(bytes: &[u8]) -> Result<Vec<ContentLine>, StageError> {
    check_magic(bytes)?;

    let document = Document::load_mem(bytes).map_err(|e| StageError::CorruptPdf(e.to_string()))?;
    if document.is_encrypted() {
        return Err(StageError::EncryptedPdf);
    }

    let pages = document.get_pages();
    debug!("PDF loaded: {} pages", pages.len());

    let mut lines = Vec::new();
    for &page_num in pages.keys() {
        let text = document
            .extract_text(&[page_num])
            .map_err(|e| StageError::CorruptPdf(format!("page {page_num}: {e}")))?;
        push_page(&mut lines, page_num, &text);
    }
    Ok(lines)
}

/// Verify the `%PDF` header before handing bytes to the parser.
fn check_magic(bytes: &[u8]) -> Result<(), StageError> {
    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        return Err(StageError::NotAPdf {
            magic: bytes.iter().take(4).copied().collect(),
        });
    }
    Ok(())
}

/// Append one page's lines, skipping pages with no text.
fn push_page(lines: &mut Vec<ContentLine>, page_num: u32, text: &str) {
    let mut body = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .peekable();
    if body.peek().is_none() {
        debug!("Page {} has no text, skipped", page_num);
        return;
    }
    if !lines.is_empty() {
        lines.push(ContentLine::Blank);
    }
    lines.push(ContentLine::Heading(format!("Page {page_num}")));
    lines.extend(body.map(|l| ContentLine::Text(l.to_string())));
}
