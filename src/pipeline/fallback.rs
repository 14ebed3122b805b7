//! Minimal notice documents, one per target kind.
//!
//! Used whenever a pipeline stage fails. Each generator writes only the title
//! and the message, so the only way it can fail is an in-memory writer error.

use crate::document::FallbackNotice;
use crate::error::StageError;
use crate::pipeline::build::pdf::{Font, PdfCanvas};
use crate::pipeline::build::sheet::cell_text;
use rust_xlsxwriter::{Format, Workbook};

const PDF_LEFT: f32 = 100.0;
const PDF_TITLE_Y: f32 = 750.0;
const PDF_MESSAGE_Y: f32 = 700.0;
const PDF_MESSAGE_WIDTH: f32 = 412.0;

/// One page: the title in bold 16 pt, the message in 12 pt below it.
pub fn pdf(notice: &FallbackNotice) -> Result<Vec<u8>, StageError> {
    let mut canvas = PdfCanvas::new();
    canvas.text_at(Font::Bold, 16.0, PDF_LEFT, PDF_TITLE_Y, &notice.title);
    canvas.text_block(
        Font::Regular,
        12.0,
        PDF_LEFT,
        PDF_MESSAGE_Y,
        PDF_MESSAGE_WIDTH,
        &notice.message,
    );
    canvas.finish(&notice.title)
}

/// The title in A1 (bold, 14 pt) and the message in A3, on the default sheet.
pub fn excel(notice: &FallbackNotice) -> Result<Vec<u8>, StageError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string_with_format(
        0,
        0,
        cell_text(&notice.title),
        &Format::new().set_bold().set_font_size(14),
    )?;
    sheet.write_string(2, 0, cell_text(&notice.message))?;
    Ok(workbook.save_to_buffer()?)
}

/// A "Title" paragraph followed by the message.
#[cfg(feature = "docx")]
pub fn word(notice: &FallbackNotice) -> Result<Vec<u8>, StageError> {
    use crate::content::{ContentLine, ExtractedContent};
    use crate::document::DocumentKind;
    use crate::pipeline::build::{word, Draft};

    let content = ExtractedContent::Lines(vec![ContentLine::Text(notice.message.clone())]);
    word::build(&Draft {
        title: &notice.title,
        source: DocumentKind::Manual,
        content: &content,
    })
}

/// Stub when the `docx` feature is not enabled.
#[cfg(not(feature = "docx"))]
pub fn word(_notice: &FallbackNotice) -> Result<Vec<u8>, StageError> {
    Err(StageError::WordUnavailable)
}

/// The message a Word-bound notice carries once it is degraded to a workbook.
pub fn degraded_message(message: &str) -> String {
    format!("{message} (Word export not available)")
}
