//! Data model shared by every conversion stage.
//!
//! A [`SourceDocument`] is owned by the caller's document store and only
//! borrowed for the duration of a conversion. Everything else here is created
//! and dropped inside a single `convert` call.

use crate::error::ConvertError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ── Kinds ────────────────────────────────────────────────────────────────

/// The stored representation of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
    Excel,
    Image,
    /// Freeform text typed by a user; has no backing file.
    Manual,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Pdf,
        DocumentKind::Word,
        DocumentKind::Excel,
        DocumentKind::Image,
        DocumentKind::Manual,
    ];

    /// Lowercase identifier, as used in URLs, the CLI and serialised records.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "word",
            DocumentKind::Excel => "excel",
            DocumentKind::Image => "image",
            DocumentKind::Manual => "manual",
        }
    }

    /// Human-readable name used in error notices ("Error processing PDF: …").
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "PDF",
            DocumentKind::Word => "Word document",
            DocumentKind::Excel => "Excel",
            DocumentKind::Image => "image",
            DocumentKind::Manual => "manual content",
        }
    }

    /// The output kind with the same name, if this kind can be generated.
    pub fn as_target(self) -> Option<TargetKind> {
        match self {
            DocumentKind::Pdf => Some(TargetKind::Pdf),
            DocumentKind::Word => Some(TargetKind::Word),
            DocumentKind::Excel => Some(TargetKind::Excel),
            DocumentKind::Image | DocumentKind::Manual => None,
        }
    }

    /// Infer a stored kind from an upload's file extension (case-insensitive).
    ///
    /// Only the extensions accepted at upload time are recognised.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            "xls" | "xlsx" => Some(DocumentKind::Excel),
            "jpg" | "jpeg" | "png" => Some(DocumentKind::Image),
            _ => None,
        }
    }

    /// Infer a stored kind from a file path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "word" | "docx" => Ok(DocumentKind::Word),
            "excel" | "xlsx" => Ok(DocumentKind::Excel),
            "image" => Ok(DocumentKind::Image),
            "manual" => Ok(DocumentKind::Manual),
            other => Err(ConvertError::UnknownKind(other.to_string())),
        }
    }
}

/// A representation the engine can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Pdf,
    Word,
    Excel,
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [TargetKind::Pdf, TargetKind::Word, TargetKind::Excel];

    pub fn mime_type(self) -> &'static str {
        match self {
            TargetKind::Pdf => "application/pdf",
            TargetKind::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            TargetKind::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TargetKind::Pdf => "pdf",
            TargetKind::Excel => "xlsx",
            TargetKind::Word => "docx",
        }
    }

    pub fn as_kind(self) -> DocumentKind {
        match self {
            TargetKind::Pdf => DocumentKind::Pdf,
            TargetKind::Word => DocumentKind::Word,
            TargetKind::Excel => DocumentKind::Excel,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_kind().as_str())
    }
}

// ── Source documents ─────────────────────────────────────────────────────

/// Where a stored document's bytes live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A file on disk, typically inside the upload folder.
    Path(PathBuf),
    /// Bytes already in memory, with the original filename if known.
    Bytes { data: Vec<u8>, name: Option<String> },
}

impl SourceLocation {
    /// Base filename of the stored document, if one is known.
    pub fn file_name(&self) -> Option<String> {
        match self {
            SourceLocation::Path(p) => p.file_name().map(|n| n.to_string_lossy().into_owned()),
            SourceLocation::Bytes { name, .. } => name.as_deref().map(|n| {
                Path::new(n)
                    .file_name()
                    .map(|b| b.to_string_lossy().into_owned())
                    .unwrap_or_else(|| n.to_string())
            }),
        }
    }
}

/// A stored document, borrowed read-only for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub kind: DocumentKind,
    pub title: String,
    /// Absent for [`DocumentKind::Manual`].
    pub location: Option<SourceLocation>,
    /// Present only for [`DocumentKind::Manual`].
    pub raw_text: Option<String>,
}

impl SourceDocument {
    /// A file-backed document stored at `path`.
    pub fn from_path(kind: DocumentKind, title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            title: title.into(),
            location: Some(SourceLocation::Path(path.into())),
            raw_text: None,
        }
    }

    /// A file-backed document whose bytes are already in memory.
    pub fn from_bytes(
        kind: DocumentKind,
        title: impl Into<String>,
        data: Vec<u8>,
        name: Option<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            location: Some(SourceLocation::Bytes { data, name }),
            raw_text: None,
        }
    }

    /// A freeform document with no backing file.
    pub fn manual(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: DocumentKind::Manual,
            title: title.into(),
            location: None,
            raw_text: Some(text.into()),
        }
    }
}

// ── Results ──────────────────────────────────────────────────────────────

/// How a [`ConversionResult`] was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Extracted and rebuilt in the target format.
    Converted,
    /// Source and target kind match; the stored bytes are returned unchanged.
    Passthrough,
    /// A step failed; the bytes are a minimal document carrying `message`.
    Fallback { message: String },
}

/// A downloadable document. `bytes` is always non-empty and valid for `mime_type`.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    /// Format of `bytes`. Differs from the request only when Word export is
    /// unavailable and the result was degraded to a spreadsheet.
    pub format: TargetKind,
    pub outcome: Outcome,
}

impl ConversionResult {
    pub(crate) fn new(bytes: Vec<u8>, title: &str, format: TargetKind, outcome: Outcome) -> Self {
        Self {
            bytes,
            mime_type: format.mime_type().to_string(),
            filename: suggested_filename(title, format),
            format,
            outcome,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, Outcome::Fallback { .. })
    }
}

/// Title and message handed to a fallback generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackNotice {
    pub title: String,
    pub message: String,
}

impl FallbackNotice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

static RE_UNSAFE_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap());

/// `<title>.<ext>` with characters that are illegal in filenames replaced.
pub fn suggested_filename(title: &str, format: TargetKind) -> String {
    let stem = RE_UNSAFE_FILENAME.replace_all(title.trim(), "_");
    let stem = if stem.trim().is_empty() {
        "document"
    } else {
        stem.as_ref()
    };
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_extension("PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_extension("doc"), Some(DocumentKind::Word));
        assert_eq!(DocumentKind::from_extension(".xlsx"), Some(DocumentKind::Excel));
        assert_eq!(DocumentKind::from_extension("jpeg"), Some(DocumentKind::Image));
        assert_eq!(DocumentKind::from_extension("gif"), None);
        assert_eq!(
            DocumentKind::from_path("/uploads/q3 report.xls"),
            Some(DocumentKind::Excel)
        );
        assert_eq!(DocumentKind::from_path("README"), None);
    }

    #[test]
    fn test_kind_parse_and_display() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.to_string().parse::<DocumentKind>().unwrap(), kind);
        }
        assert!("spreadsheet".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&DocumentKind::Excel).unwrap();
        assert_eq!(json, "\"excel\"");
        let kind: DocumentKind = serde_json::from_str("\"manual\"").unwrap();
        assert_eq!(kind, DocumentKind::Manual);
    }

    #[test]
    fn test_target_mime_and_extension() {
        assert_eq!(TargetKind::Pdf.mime_type(), "application/pdf");
        assert_eq!(TargetKind::Excel.extension(), "xlsx");
        assert_eq!(TargetKind::Word.extension(), "docx");
        assert_eq!(DocumentKind::Image.as_target(), None);
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("Q3 Report", TargetKind::Pdf), "Q3 Report.pdf");
        assert_eq!(suggested_filename("a/b:c", TargetKind::Excel), "a_b_c.xlsx");
        assert_eq!(suggested_filename("   ", TargetKind::Word), "document.docx");
    }

    #[test]
    fn test_location_file_name() {
        let loc = SourceLocation::Path(PathBuf::from("/uploads/photo.png"));
        assert_eq!(loc.file_name().as_deref(), Some("photo.png"));
        let loc = SourceLocation::Bytes {
            data: vec![],
            name: Some("dir/scan.jpg".into()),
        };
        assert_eq!(loc.file_name().as_deref(), Some("scan.jpg"));
        let loc = SourceLocation::Bytes {
            data: vec![],
            name: None,
        };
        assert_eq!(loc.file_name(), None);
    }
}
