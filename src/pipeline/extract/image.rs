//! Image "extraction": decode the image and describe it.
//!
//! Images carry no text. The extractor reports container format, pixel
//! dimensions, colour mode and filename, and keeps the decoded pixels so the
//! PDF builder can embed the picture itself.

use crate::content::{ExtractedImage, ImageInfo};
use crate::error::StageError;
use image::{ColorType, ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::debug;

/// Decode `bytes` and collect the metadata block.
pub fn extract(bytes: &[u8], file_name: String) -> Result<ExtractedImage, StageError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| StageError::Image(e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| StageError::Image("unrecognised image format".to_string()))?;
    let pixels = reader.decode()?;

    let info = ImageInfo {
        format: format_name(format),
        width: pixels.width(),
        height: pixels.height(),
        mode: color_mode(pixels.color()).to_string(),
        file_name,
    };
    debug!(
        "Decoded {} image {}x{} ({})",
        info.format, info.width, info.height, info.mode
    );
    Ok(ExtractedImage { info, pixels })
}

fn format_name(format: ImageFormat) -> String {
    format!("{format:?}").to_uppercase()
}

/// Conventional short colour-mode names (`L`, `RGB`, `I;16`, …).
fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        _ => "unknown",
    }
}
