//! Configuration types for document conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The Word capability is resolved once
//! per process ([`Capabilities::detected`]) and combined with the config when
//! a [`crate::convert::Converter`] is constructed, so builder selection never
//! re-checks it per call.

use crate::document::TargetKind;
use crate::error::ConvertError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Configuration for document conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use docmorph::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .pdf_row_limit(100)
///     .word_export(false)
///     .build()
///     .unwrap();
/// assert_eq!(config.pdf_row_limit, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Spreadsheet rows copied per sheet when the target is PDF. Default: 50.
    ///
    /// Paragraph-based PDF layout grows quickly with row count; past a few
    /// dozen rows the output is more useful as the original workbook.
    pub pdf_row_limit: usize,

    /// Spreadsheet rows copied per sheet when the target is Word. Default: 30.
    pub word_row_limit: usize,

    /// Width of the box an image source is drawn into, in PDF points. Default: 400.
    pub image_width: f32,

    /// Height of the image box in PDF points. Default: 300.
    pub image_height: f32,

    /// Produce Word output when requested. Default: true.
    ///
    /// Effective only when the crate was compiled with the `docx` feature.
    /// When off, Word targets degrade to a spreadsheet carrying a notice.
    pub word_export: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pdf_row_limit: 50,
            word_row_limit: 30,
            image_width: 400.0,
            image_height: 300.0,
            word_export: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Per-sheet row cap applied when a spreadsheet is rendered toward `target`.
    ///
    /// Spreadsheet → spreadsheet is a passthrough, so the Excel arm is never
    /// reached through the matrix; it is uncapped.
    pub fn row_limit(&self, target: TargetKind) -> usize {
        match target {
            TargetKind::Pdf => self.pdf_row_limit,
            TargetKind::Word => self.word_row_limit,
            TargetKind::Excel => usize::MAX,
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn pdf_row_limit(mut self, rows: usize) -> Self {
        self.config.pdf_row_limit = rows.max(1);
        self
    }

    pub fn word_row_limit(mut self, rows: usize) -> Self {
        self.config.word_row_limit = rows.max(1);
        self
    }

    pub fn image_box(mut self, width: f32, height: f32) -> Self {
        self.config.image_width = width;
        self.config.image_height = height;
        self
    }

    pub fn word_export(mut self, enabled: bool) -> Self {
        self.config.word_export = enabled;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.pdf_row_limit == 0 || c.word_row_limit == 0 {
            return Err(ConvertError::InvalidConfig(
                "Row limits must be ≥ 1".into(),
            ));
        }
        // Letter page minus margins and the title block.
        if !(c.image_width > 0.0 && c.image_width <= 468.0) {
            return Err(ConvertError::InvalidConfig(format!(
                "Image width must be in (0, 468] points, got {}",
                c.image_width
            )));
        }
        if !(c.image_height > 0.0 && c.image_height <= 560.0) {
            return Err(ConvertError::InvalidConfig(format!(
                "Image height must be in (0, 560] points, got {}",
                c.image_height
            )));
        }
        Ok(self.config)
    }
}

// ── Capabilities ─────────────────────────────────────────────────────────

/// Optional output backends available in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Word (.docx) reading and writing.
    pub word: bool,
}

static DETECTED: Lazy<Capabilities> = Lazy::new(|| Capabilities {
    word: cfg!(feature = "docx"),
});

impl Capabilities {
    /// Capabilities compiled into this binary, detected once per process.
    pub fn detected() -> Capabilities {
        *DETECTED
    }

    /// Narrow the detected capabilities by what the config asks for.
    pub fn resolve(config: &ConversionConfig) -> Capabilities {
        let detected = Self::detected();
        Capabilities {
            word: detected.word && config.word_export,
        }
    }
}
