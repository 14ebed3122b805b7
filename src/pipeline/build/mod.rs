//! Target builders.
//!
//! A builder renders a [`Draft`] (title + extracted content) into the bytes
//! of one target format.

pub mod pdf;
pub mod sheet;
pub mod word;

use crate::config::ConversionConfig;
use crate::content::ExtractedContent;
use crate::document::{DocumentKind, TargetKind};
use crate::error::StageError;
use serde::{Deserialize, Serialize};

/// Input to a builder.
#[derive(Debug, Clone, Copy)]
pub struct Draft<'a> {
    pub title: &'a str,
    /// Kind the content was extracted from; selects sheet names.
    pub source: DocumentKind,
    pub content: &'a ExtractedContent,
}

/// Which rendering routine a route uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Builder {
    Pdf,
    Word,
    Spreadsheet,
}

impl Builder {
    pub fn target(self) -> TargetKind {
        match self {
            Builder::Pdf => TargetKind::Pdf,
            Builder::Word => TargetKind::Word,
            Builder::Spreadsheet => TargetKind::Excel,
        }
    }

    pub fn run(self, draft: &Draft<'_>, config: &ConversionConfig) -> Result<Vec<u8>, StageError> {
        match self {
            Builder::Pdf => pdf::build(draft, config),
            Builder::Word => word::build(draft),
            Builder::Spreadsheet => sheet::build(draft),
        }
    }
}
