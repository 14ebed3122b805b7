//! Excel (.xlsx) generation via rust_xlsxwriter.
//!
//! Layout: the title in A1 (bold, 14 pt), row 2 left empty, then one content
//! line per row in column A starting at A3.

use super::Draft;
use crate::content::{ContentLine, ExtractedContent};
use crate::document::DocumentKind;
use crate::error::StageError;
use rust_xlsxwriter::{Format, Workbook};

/// Zero-based row of the first content line (A3).
const FIRST_CONTENT_ROW: u32 = 2;

/// Excel's per-cell text limit, in characters.
pub(crate) const MAX_CELL_CHARS: usize = 32_767;

const IMAGE_COLUMN_WIDTH: f64 = 30.0;
const TEXT_COLUMN_WIDTH: f64 = 50.0;

/// Render a draft as a single-sheet workbook.
pub fn build(draft: &Draft<'_>) -> Result<Vec<u8>, StageError> {
    let mut workbook = Workbook::new();
    let title_format = Format::new().set_bold().set_font_size(14);
    let heading_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(draft.source))?;
    sheet.write_string_with_format(0, 0, cell_text(draft.title), &title_format)?;

    let width = match draft.content {
        ExtractedContent::Image(_) => IMAGE_COLUMN_WIDTH,
        ExtractedContent::Lines(_) => TEXT_COLUMN_WIDTH,
    };
    sheet.set_column_width(0, width)?;

    let mut row = FIRST_CONTENT_ROW;
    for line in draft.content.lines() {
        match &line {
            ContentLine::Heading(t) => {
                sheet.write_string_with_format(row, 0, cell_text(t), &heading_format)?;
            }
            ContentLine::Text(t) | ContentLine::Marker(t) => {
                sheet.write_string(row, 0, cell_text(t))?;
            }
            ContentLine::Blank => {}
        }
        row += 1;
    }

    Ok(workbook.save_to_buffer()?)
}

/// `text` cut to at most [`MAX_CELL_CHARS`] characters, on a char boundary.
pub(crate) fn cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

fn sheet_name(source: DocumentKind) -> &'static str {
    match source {
        DocumentKind::Pdf => "PDF Content",
        DocumentKind::Image => "Image Info",
        DocumentKind::Word | DocumentKind::Manual | DocumentKind::Excel => "Document Content",
    }
}
