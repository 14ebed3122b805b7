//! Error types for the docmorph library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] is **caller-facing**: the request itself cannot be
//!   honoured (the (source, target) pair is outside the conversion matrix,
//!   the configuration is invalid, the output file cannot be written).
//!   Returned as `Err(ConvertError)` from the top-level `convert*` functions.
//!
//! * [`StageError`] is **recoverable**: one extraction or build step failed
//!   (missing file, corrupt workbook, unreadable image). It never escapes the
//!   dispatcher; instead its message is rendered into a fallback document of
//!   the requested format so the caller still receives a valid download.

use crate::document::{DocumentKind, TargetKind};
use std::path::PathBuf;
use thiserror::Error;

/// All errors a caller of the docmorph library can observe.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Request errors ────────────────────────────────────────────────────
    /// The (source kind, target kind) pair is not in the conversion matrix.
    #[error("Conversion from {from} to {to} is not supported")]
    Unsupported {
        from: DocumentKind,
        to: DocumentKind,
    },

    /// A kind name could not be parsed.
    #[error("Unknown document kind '{0}'\nExpected one of: pdf, word, excel, image, manual")]
    UnknownKind(String),

    // ── Output errors ─────────────────────────────────────────────────────
    /// Even the minimal fallback document could not be serialised.
    #[error("Could not produce a fallback {target} document: {detail}")]
    FallbackFailed { target: TargetKind, detail: String },

    /// Could not create or write the converted file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failure inside a single extraction or build step.
///
/// The `Display` output is the cause embedded into the fallback document as
/// `"Error processing <kind>: <cause>"`, so messages are written for an end
/// user reading the downloaded file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StageError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A file-backed kind arrived without a location.
    #[error("document has no stored file")]
    MissingLocation,

    /// Source file was not found at the given path.
    #[error("file not found: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// The stored file has no content.
    #[error("stored file is empty")]
    EmptySource,

    /// Any other I/O failure while reading the source.
    #[error("could not read '{}': {detail}", path.display())]
    ReadFailed { path: PathBuf, detail: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The bytes are not a PDF.
    #[error("file is not a valid PDF (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    /// The PDF is encrypted and cannot be read without a password.
    #[error("PDF is encrypted")]
    EncryptedPdf,

    /// lopdf could not parse the PDF or one of its pages.
    #[error("PDF is corrupt: {0}")]
    CorruptPdf(String),

    /// docx-rs could not read the Word document.
    #[error("cannot read Word document: {0}")]
    Word(String),

    /// calamine could not read the workbook.
    #[error("cannot read workbook: {0}")]
    Spreadsheet(String),

    /// The workbook opened but has no worksheets.
    #[error("workbook contains no sheets")]
    EmptyWorkbook,

    /// The image could not be decoded.
    #[error("cannot read image: {0}")]
    Image(String),

    // ── Build errors ──────────────────────────────────────────────────────
    /// Word support was compiled out or disabled in the configuration.
    #[error("Word support is not available")]
    WordUnavailable,

    /// PDF serialisation failed.
    #[error("PDF generation failed: {0}")]
    PdfWrite(String),

    /// DOCX serialisation failed.
    #[error("Word generation failed: {0}")]
    WordWrite(String),

    /// XLSX serialisation failed.
    #[error("Excel generation failed: {0}")]
    SpreadsheetWrite(String),
}

impl From<lopdf::Error> for StageError {
    fn from(e: lopdf::Error) -> Self {
        StageError::PdfWrite(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for StageError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        StageError::SpreadsheetWrite(e.to_string())
    }
}

impl From<calamine::Error> for StageError {
    fn from(e: calamine::Error) -> Self {
        StageError::Spreadsheet(e.to_string())
    }
}

impl From<image::ImageError> for StageError {
    fn from(e: image::ImageError) -> Self {
        StageError::Image(e.to_string())
    }
}
