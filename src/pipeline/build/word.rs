//! Word (.docx) generation via docx-rs.

use super::Draft;
use crate::error::StageError;

#[cfg(feature = "docx")]
use crate::content::{ContentLine, ExtractedContent};
#[cfg(feature = "docx")]
use crate::document::DocumentKind;

/// Render a draft as a Word document: a "Title" paragraph, then one
/// paragraph per line. Page and sheet headings use "Heading1"; an image
/// source is described by its metadata block as plain paragraphs. Page
/// separators of a PDF source are dropped; sheet separators stay.
#[cfg(feature = "docx")]
pub fn build(draft: &Draft<'_>) -> Result<Vec<u8>, StageError> {
    use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
    use std::io::Cursor;

    let mut docx = Docx::new()
        .add_style(
            Style::new("Title", StyleType::Paragraph)
                .name("Title")
                .size(52)
                .bold(),
        )
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_paragraph(styled(draft.title, "Title"));

    let flat = matches!(draft.content, ExtractedContent::Image(_));
    for line in draft.content.lines() {
        if line == ContentLine::Blank && draft.source == DocumentKind::Pdf {
            continue;
        }
        let paragraph = match &line {
            ContentLine::Heading(t) if !flat => styled(t, "Heading1"),
            ContentLine::Heading(t) | ContentLine::Text(t) | ContentLine::Marker(t) => {
                Paragraph::new().add_run(Run::new().add_text(t.as_str()))
            }
            ContentLine::Blank => Paragraph::new(),
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| StageError::WordWrite(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Stub when the `docx` feature is not enabled.
#[cfg(not(feature = "docx"))]
pub fn build(_draft: &Draft<'_>) -> Result<Vec<u8>, StageError> {
    Err(StageError::WordUnavailable)
}

#[cfg(feature = "docx")]
fn styled(text: &str, style: &str) -> docx_rs::Paragraph {
    docx_rs::Paragraph::new()
        .style(style)
        .add_run(docx_rs::Run::new().add_text(text))
}

#[cfg(all(test, feature = "docx"))]
mod tests {
    use super::*;
    use crate::pipeline::extract::word as word_extract;

    #[test]
    fn test_build_round_trips_text() {
        let content = ExtractedContent::Lines(vec![
            ContentLine::Heading("Sheet: Data".into()),
            ContentLine::Text("a | b".into()),
            ContentLine::Blank,
            ContentLine::Marker("... (more rows in original file)".into()),
        ]);
        let draft = Draft {
            title: "Quarterly",
            source: DocumentKind::Excel,
            content: &content,
        };
        let bytes = build(&draft).unwrap();
        assert!(bytes.starts_with(b"PK"));

        let texts: Vec<String> = word_extract::extract(&bytes)
            .unwrap()
            .iter()
            .map(|l| l.text().to_string())
            .collect();
        assert_eq!(
            texts,
            vec![
                "Quarterly",
                "Sheet: Data",
                "a | b",
                "... (more rows in original file)"
            ]
        );
    }

    fn body_paragraph_count(bytes: &[u8]) -> usize {
        docx_rs::read_docx(bytes)
            .unwrap()
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Paragraph(_)))
            .count()
    }

    #[test]
    fn test_page_separator_dropped_for_pdf_source() {
        let content = ExtractedContent::Lines(vec![
            ContentLine::Heading("Page 1".into()),
            ContentLine::Text("alpha".into()),
            ContentLine::Blank,
            ContentLine::Heading("Page 2".into()),
        ]);
        let pdf = Draft {
            title: "Notes",
            source: DocumentKind::Pdf,
            content: &content,
        };
        assert_eq!(body_paragraph_count(&build(&pdf).unwrap()), 4);

        let sheet = Draft {
            source: DocumentKind::Excel,
            ..pdf
        };
        assert_eq!(body_paragraph_count(&build(&sheet).unwrap()), 5);
    }

    #[test]
    fn test_title_uses_title_style() {
        let content = ExtractedContent::Lines(vec![]);
        let draft = Draft {
            title: "Styled",
            source: DocumentKind::Manual,
            content: &content,
        };
        let bytes = build(&draft).unwrap();
        let docx = docx_rs::read_docx(&bytes).unwrap();
        let first = docx.document.children.first().unwrap();
        let docx_rs::DocumentChild::Paragraph(p) = first else {
            panic!("expected paragraph, got {first:?}");
        };
        let style = p.property.style.as_ref().map(|s| s.val.as_str());
        assert_eq!(style, Some("Title"));
    }
}
