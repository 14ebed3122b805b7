//! Shared fixtures: every input document is generated in-test, and every
//! output is re-opened with an independent reader.

#![allow(dead_code)]

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use std::path::{Path, PathBuf};

// ── Writers ──────────────────────────────────────────────────────────────

/// A PDF with one page per entry; each string is drawn as its own text line.
/// An empty slice produces a page without any text.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut ops = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            ops.push(Operation::new("Td", vec![72.into(), (720 - 16 * i as i64).into()]));
            ops.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            ops.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations: ops }.encode().unwrap();
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A workbook with one sheet per `(name, rows)`; cells are written as strings.
pub fn workbook(sheets: &[(&str, Vec<Vec<String>>)]) -> Vec<u8> {
    let mut wb = Workbook::new();
    for (name, rows) in sheets {
        let ws = wb.add_worksheet();
        ws.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                ws.write_string(r as u32, c as u16, cell.as_str()).unwrap();
            }
        }
    }
    wb.save_to_buffer().unwrap()
}

/// `n` rows of two cells: `r<i>` and `v<i>`, 1-based.
pub fn numbered_rows(n: usize) -> Vec<Vec<String>> {
    (1..=n)
        .map(|i| vec![format!("r{i}"), format!("v{i}")])
        .collect()
}

#[cfg(feature = "docx")]
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let mut docx = Docx::new();
    for p in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([20, 120, 220])));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Write `bytes` into `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

// ── Readers ──────────────────────────────────────────────────────────────

/// Text of every page of a PDF, concatenated.
pub fn pdf_text(bytes: &[u8]) -> String {
    let doc = Document::load_mem(bytes).expect("output is not a loadable PDF");
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    doc.extract_text(&pages).unwrap()
}

pub fn pdf_page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes).unwrap().get_pages().len()
}

/// Column A of the first sheet, by row, with empty cells as `""`.
pub fn sheet_column_a(bytes: &[u8]) -> (String, Vec<String>) {
    let mut wb =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).expect("output is not a workbook");
    let name = wb.sheet_names()[0].clone();
    let range = wb.worksheet_range(&name).unwrap();
    let rows = range.end().map(|(r, _)| r + 1).unwrap_or(0);
    let cells = (0..rows)
        .map(|r| match range.get_value((r, 0)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Empty) | None => String::new(),
            Some(other) => other.to_string(),
        })
        .collect();
    (name, cells)
}

/// Non-empty paragraph texts of a Word document, in order.
#[cfg(feature = "docx")]
pub fn docx_paragraphs(bytes: &[u8]) -> Vec<String> {
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

    let docx = read_docx(bytes).expect("output is not a docx");
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(p),
            _ => None,
        })
        .map(|p| {
            let mut text = String::new();
            for child in &p.children {
                if let ParagraphChild::Run(run) = child {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text
        })
        .filter(|t| !t.is_empty())
        .collect()
}
