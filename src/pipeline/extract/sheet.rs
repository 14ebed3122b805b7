//! Spreadsheet extraction via calamine.
//!
//! Each worksheet becomes a `"Sheet: <name>"` heading followed by one line
//! per non-empty row, cells joined with `" | "`. Rows are capped per sheet:
//! once the cap is reached a single truncation marker line is appended and
//! the rest of the sheet is skipped.

use crate::content::{ContentLine, TRUNCATION_MARKER};
use crate::error::StageError;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;
use tracing::debug;

/// Cell separator within a row line.
pub const CELL_SEPARATOR: &str = " | ";

/// Extract every sheet of a workbook, at most `row_limit` rows per sheet.
pub fn extract(bytes: &[u8], row_limit: usize) -> Result<Vec<ContentLine>, StageError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(StageError::EmptyWorkbook);
    }
    debug!("Workbook has {} sheets", names.len());

    let mut lines = Vec::new();
    for (i, name) in names.iter().enumerate() {
        let range = workbook.worksheet_range(name)?;
        if i > 0 {
            lines.push(ContentLine::Blank);
        }
        lines.push(ContentLine::Heading(format!("Sheet: {name}")));
        push_rows(&mut lines, &range, row_limit);
    }
    Ok(lines)
}

/// Append up to `row_limit` non-empty rows of `range`.
fn push_rows(lines: &mut Vec<ContentLine>, range: &Range<Data>, row_limit: usize) {
    // Columns left of the used range are empty; pad them so cell positions
    // read the same as in the sheet.
    let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut emitted = 0;
    for row in range.rows() {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        lines.push(ContentLine::Text(join_row(row, leading)));
        emitted += 1;
        if emitted >= row_limit {
            debug!("Row cap {} reached", row_limit);
            lines.push(ContentLine::Marker(TRUNCATION_MARKER.to_string()));
            return;
        }
    }
}

fn join_row(row: &[Data], leading: usize) -> String {
    std::iter::repeat(String::new())
        .take(leading)
        .chain(row.iter().map(cell_text))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
