//! Conversion entry points.
//!
//! [`Converter::convert`] is the dispatcher: it looks the pair up in the
//! [`matrix`](crate::matrix), runs the route, and turns every stage failure
//! into a fallback document of the requested format. The only errors a caller
//! sees are request errors (unsupported pair) and, in practice never, a
//! fallback that could not be serialised.

use crate::config::{Capabilities, ConversionConfig};
use crate::document::{ConversionResult, DocumentKind, FallbackNotice, Outcome, SourceDocument, TargetKind};
use crate::error::{ConvertError, StageError};
use crate::matrix::{self, Route};
use crate::pipeline::build::{Builder, Draft};
use crate::pipeline::extract::Extractor;
use crate::pipeline::{fallback, input};
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

static DEFAULT_CONVERTER: Lazy<Converter> = Lazy::new(|| Converter::new(ConversionConfig::default()));

/// A configured conversion engine.
///
/// Holds no mutable state; clone it freely or share it across threads.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConversionConfig,
    caps: Capabilities,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl Converter {
    pub fn new(config: ConversionConfig) -> Self {
        let caps = Capabilities::resolve(&config);
        debug!("Converter capabilities: {:?}", caps);
        Self { config, caps }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Convert `source` into `target`.
    ///
    /// # Errors
    /// * [`ConvertError::Unsupported`] if the pair is outside the matrix.
    /// * [`ConvertError::FallbackFailed`] if a stage failed and even the
    ///   minimal notice document could not be written.
    ///
    /// Every other failure is reported inside the returned document.
    pub fn convert(
        &self,
        source: &SourceDocument,
        target: DocumentKind,
    ) -> Result<ConversionResult, ConvertError> {
        let start = Instant::now();
        let route = matrix::route(source.kind, target)?;
        let target = route.target();
        info!("Converting '{}': {} -> {}", source.title, source.kind, target);

        let result = match self.run_route(source, route) {
            Ok((bytes, outcome)) => ConversionResult::new(bytes, &source.title, target, outcome),
            Err(cause) => {
                let message = format!("Error processing {}: {}", source.kind.label(), cause);
                warn!("{}; producing fallback {}", message, target);
                self.fallback(&FallbackNotice::new(source.title.as_str(), message), target)?
            }
        };

        info!(
            "Produced {} ({} bytes, {:?}) in {}ms",
            result.filename,
            result.bytes.len(),
            result.outcome,
            start.elapsed().as_millis()
        );
        Ok(result)
    }

    fn run_route(&self, source: &SourceDocument, route: Route) -> Result<(Vec<u8>, Outcome), StageError> {
        match route {
            Route::Passthrough(_) => {
                let bytes = input::read_source(source)?.into_owned();
                Ok((bytes, Outcome::Passthrough))
            }
            Route::Pipeline { extractor, builder } => {
                let bytes = self.run_pipeline(source, extractor, builder)?;
                Ok((bytes, Outcome::Converted))
            }
        }
    }

    fn run_pipeline(
        &self,
        source: &SourceDocument,
        extractor: Extractor,
        builder: Builder,
    ) -> Result<Vec<u8>, StageError> {
        if builder == Builder::Word && !self.caps.word {
            return Err(StageError::WordUnavailable);
        }
        let content = extractor.run(source, self.config.row_limit(builder.target()))?;
        debug!("Extracted {} lines with {:?}", content.lines().len(), extractor);

        let draft = Draft {
            title: &source.title,
            source: source.kind,
            content: &content,
        };
        let bytes = builder.run(&draft, &self.config)?;
        debug!("Built {} bytes with {:?}", bytes.len(), builder);
        Ok(bytes)
    }

    /// Produce a notice document for `target`. A Word notice degrades to a
    /// workbook when Word output is unavailable.
    fn fallback(&self, notice: &FallbackNotice, target: TargetKind) -> Result<ConversionResult, ConvertError> {
        let (notice, format) = if target == TargetKind::Word && !self.caps.word {
            let degraded = FallbackNotice::new(
                notice.title.as_str(),
                fallback::degraded_message(&notice.message),
            );
            (degraded, TargetKind::Excel)
        } else {
            (notice.clone(), target)
        };

        let bytes = match format {
            TargetKind::Pdf => fallback::pdf(&notice),
            TargetKind::Word => fallback::word(&notice),
            TargetKind::Excel => fallback::excel(&notice),
        }
        .map_err(|e| {
            error!("Fallback {} failed: {}", format, e);
            ConvertError::FallbackFailed {
                target: format,
                detail: e.to_string(),
            }
        })?;

        Ok(ConversionResult::new(
            bytes,
            &notice.title,
            format,
            Outcome::Fallback {
                message: notice.message,
            },
        ))
    }
}

/// Convert with the default configuration.
///
/// Equivalent to `Converter::default().convert(source, target)` but reuses a
/// process-wide converter.
pub fn convert(source: &SourceDocument, target: DocumentKind) -> Result<ConversionResult, ConvertError> {
    DEFAULT_CONVERTER.convert(source, target)
}

/// Run a conversion on tokio's blocking pool.
///
/// Extraction and building are CPU-bound and use synchronous I/O, so they
/// must not run on an async worker thread.
pub async fn convert_async(
    source: SourceDocument,
    target: DocumentKind,
    converter: &Converter,
) -> Result<ConversionResult, ConvertError> {
    let converter = converter.clone();
    tokio::task::spawn_blocking(move || converter.convert(&source, target))
        .await
        .map_err(|e| ConvertError::Internal(format!("conversion task panicked: {e}")))?
}

/// Convert and write the result to disk, returning the written path.
///
/// See [`save_result`] for how `output` is interpreted.
pub fn convert_to_file(
    source: &SourceDocument,
    target: DocumentKind,
    output: impl AsRef<Path>,
    converter: &Converter,
) -> Result<PathBuf, ConvertError> {
    let result = converter.convert(source, target)?;
    save_result(&result, output)
}

/// Write a result to disk, returning the written path.
///
/// If `output` is an existing directory the result's suggested filename is
/// used inside it. Uses atomic write (temp file + rename) to prevent partial
/// files.
pub fn save_result(result: &ConversionResult, output: impl AsRef<Path>) -> Result<PathBuf, ConvertError> {
    let output = output.as_ref();
    let path = if output.is_dir() {
        output.join(&result.filename)
    } else {
        output.to_path_buf()
    };
    write_atomic(&path, &result.bytes)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_err = |source: std::io::Error| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, bytes).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        write_err(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_to_excel_converted() {
        let src = SourceDocument::manual("Notes", "one\ntwo");
        let out = convert(&src, DocumentKind::Excel).unwrap();
        assert_eq!(out.outcome, Outcome::Converted);
        assert_eq!(out.filename, "Notes.xlsx");
        assert!(!out.bytes.is_empty());
    }

    #[test]
    fn test_unsupported_pair_is_error() {
        let src = SourceDocument::manual("Notes", "x");
        assert!(matches!(
            convert(&src, DocumentKind::Manual),
            Err(ConvertError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let src = SourceDocument::from_path(DocumentKind::Pdf, "Lost", "/no/such/file.pdf");
        let out = convert(&src, DocumentKind::Excel).unwrap();
        let Outcome::Fallback { message } = &out.outcome else {
            panic!("expected fallback, got {:?}", out.outcome);
        };
        assert!(message.starts_with("Error processing PDF: file not found"), "{message}");
        assert_eq!(out.format, TargetKind::Excel);
    }

    #[test]
    fn test_word_disabled_degrades_to_excel() {
        let config = ConversionConfig::builder().word_export(false).build().unwrap();
        let converter = Converter::new(config);
        let src = SourceDocument::manual("Memo", "hello");
        let out = converter.convert(&src, DocumentKind::Word).unwrap();
        assert_eq!(out.format, TargetKind::Excel);
        assert_eq!(out.mime_type, TargetKind::Excel.mime_type());
        assert_eq!(out.filename, "Memo.xlsx");
        assert_eq!(
            out.outcome,
            Outcome::Fallback {
                message: "Error processing manual content: Word support is not available \
                          (Word export not available)"
                    .into()
            }
        );
    }

    #[test]
    fn test_convert_to_file_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = SourceDocument::manual("Out: 1", "body");
        let path = convert_to_file(&src, DocumentKind::Pdf, dir.path(), &Converter::default()).unwrap();
        assert_eq!(path, dir.path().join("Out_ 1.pdf"));
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
        assert!(!dir.path().join("Out_ 1.pdf.tmp").exists());
    }
}
