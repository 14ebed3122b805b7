//! Content extractors, one per source kind.
//!
//! Every extractor takes the stored bytes (or, for manual documents, the
//! stored text) and returns [`ExtractedContent`]. None of them keeps state
//! between calls.

pub mod image;
pub mod pdf;
pub mod sheet;
pub mod word;

use crate::content::{text_lines_or_placeholder, ContentLine, ExtractedContent};
use crate::document::SourceDocument;
use crate::error::StageError;
use crate::pipeline::input;
use serde::{Deserialize, Serialize};

/// Which extraction routine a route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extractor {
    Pdf,
    Word,
    Spreadsheet,
    Image,
    Manual,
}

impl Extractor {
    /// Run this extractor against `source`.
    ///
    /// `row_limit` only affects [`Extractor::Spreadsheet`].
    pub fn run(self, source: &SourceDocument, row_limit: usize) -> Result<ExtractedContent, StageError> {
        let content = match self {
            Extractor::Manual => ExtractedContent::Lines(manual(source.raw_text.as_deref())),
            Extractor::Pdf => ExtractedContent::Lines(pdf::extract(&input::read_source(source)?)?),
            Extractor::Word => ExtractedContent::Lines(word::extract(&input::read_source(source)?)?),
            Extractor::Spreadsheet => {
                ExtractedContent::Lines(sheet::extract(&input::read_source(source)?, row_limit)?)
            }
            Extractor::Image => {
                let bytes = input::read_source(source)?;
                let extracted = image::extract(&bytes, input::display_name(source))?;
                ExtractedContent::Image(Box::new(extracted))
            }
        };
        Ok(content)
    }
}

/// Lines of a freeform document; absent text counts as empty.
pub fn manual(raw_text: Option<&str>) -> Vec<ContentLine> {
    text_lines_or_placeholder(raw_text.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NO_CONTENT;
    use crate::document::DocumentKind;

    #[test]
    fn test_manual_lines() {
        let src = SourceDocument::manual("Notes", "alpha\n\n  beta  \n");
        let content = Extractor::Manual.run(&src, 50).unwrap();
        let texts: Vec<String> = content.lines().iter().map(|l| l.text().to_string()).collect();
        assert_eq!(texts, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_manual_absent_text() {
        assert_eq!(manual(None), vec![ContentLine::Text(NO_CONTENT.into())]);
    }

    #[test]
    fn test_file_kind_without_location() {
        let src = SourceDocument {
            kind: DocumentKind::Pdf,
            title: "t".into(),
            location: None,
            raw_text: None,
        };
        assert_eq!(
            Extractor::Pdf.run(&src, 50).unwrap_err(),
            StageError::MissingLocation
        );
    }
}
