//! # docmorph
//!
//! Convert stored documents (PDF, Word, Excel, images, or freeform text)
//! into PDF, Word or Excel downloads.
//!
//! Every supported conversion returns a structurally valid document of the
//! requested format. When a source cannot be read or rendered, the result is
//! a minimal document of that format carrying the title and the error, never
//! an `Err`.
//!
//! ## Pipeline Overview
//!
//! ```text
//! SourceDocument + target kind
//!  │
//!  ├─ 1. Route     look the pair up in the conversion matrix
//!  ├─ 2. Input     read the stored bytes (or take the manual text)
//!  ├─ 3. Extract   lines of text, or image metadata + pixels
//!  ├─ 4. Build     render PDF (lopdf), Word (docx-rs) or Excel (rust_xlsxwriter)
//!  └─ 5. Fallback  on any stage error, a notice document of the target kind
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docmorph::{convert, DocumentKind, SourceDocument};
//!
//! let source = SourceDocument::from_path(DocumentKind::Pdf, "Q3 report", "uploads/q3.pdf");
//! let result = convert(&source, DocumentKind::Excel)?;
//! std::fs::write(&result.filename, &result.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docmorph` binary (clap + anyhow + tracing-subscriber) |
//! | `docx`  | on      | Word reading and writing via docx-rs |
//!
//! Without `docx`, Word sources fall back and Word targets degrade to an
//! Excel notice document.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod content;
pub mod convert;
pub mod document;
pub mod error;
pub mod matrix;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Capabilities, ConversionConfig, ConversionConfigBuilder};
pub use content::{ContentLine, ExtractedContent, ImageInfo, NO_CONTENT, TRUNCATION_MARKER};
pub use convert::{convert, convert_async, convert_to_file, save_result, Converter};
pub use document::{
    ConversionResult, DocumentKind, FallbackNotice, Outcome, SourceDocument, SourceLocation,
    TargetKind,
};
pub use error::{ConvertError, StageError};
pub use matrix::{route, supported_pairs, Route};
