//! Extracted content: the hand-off between extractors and builders.
//!
//! Extractors flatten every text-bearing source into an ordered list of
//! [`ContentLine`]s. Structural hints (a page header, a sheet name, the
//! truncation marker) travel as distinct variants so each builder can style
//! them without knowing which source kind produced them.

use image::DynamicImage;

/// Literal line rendered when a manual or Word source has no text.
pub const NO_CONTENT: &str = "No content available";

/// Literal line appended when a sheet was cut at the row cap.
pub const TRUNCATION_MARKER: &str = "... (more rows in original file)";

/// One line of extracted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLine {
    /// A section header: `"Page 3"`, `"Sheet: Budget"`, `"Image Information:"`.
    Heading(String),
    /// A body line.
    Text(String),
    /// The truncation marker, rendered de-emphasised.
    Marker(String),
    /// A blank separator between sections.
    Blank,
}

impl ContentLine {
    pub fn text(&self) -> &str {
        match self {
            ContentLine::Heading(s) | ContentLine::Text(s) | ContentLine::Marker(s) => s,
            ContentLine::Blank => "",
        }
    }
}

/// Technical facts about an image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Upper-case container format, e.g. `PNG`, `JPEG`.
    pub format: String,
    pub width: u32,
    pub height: u32,
    /// Colour mode in the conventional short notation: `L`, `LA`, `RGB`, `RGBA`, …
    pub mode: String,
    pub file_name: String,
}

impl ImageInfo {
    /// The fixed five-line block shared by the Excel and Word image outputs.
    pub fn lines(&self) -> Vec<ContentLine> {
        vec![
            ContentLine::Heading("Image Information:".to_string()),
            ContentLine::Text(format!("Format: {}", self.format)),
            ContentLine::Text(format!("Size: {} x {} pixels", self.width, self.height)),
            ContentLine::Text(format!("Mode: {}", self.mode)),
            ContentLine::Text(format!("File: {}", self.file_name)),
        ]
    }
}

/// A decoded image plus its metadata.
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    pub info: ImageInfo,
    pub pixels: DynamicImage,
}

/// Everything an extractor can hand to a builder.
#[derive(Debug, Clone)]
pub enum ExtractedContent {
    Lines(Vec<ContentLine>),
    Image(Box<ExtractedImage>),
}

impl ExtractedContent {
    /// The content as lines; images contribute their metadata block.
    pub fn lines(&self) -> Vec<ContentLine> {
        match self {
            ExtractedContent::Lines(lines) => lines.clone(),
            ExtractedContent::Image(img) => img.info.lines(),
        }
    }
}

/// Split freeform text into trimmed, non-blank body lines.
///
/// Returns a single [`NO_CONTENT`] line when nothing remains.
pub fn text_lines_or_placeholder(text: &str) -> Vec<ContentLine> {
    let lines: Vec<ContentLine> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| ContentLine::Text(l.to_string()))
        .collect();
    if lines.is_empty() {
        vec![ContentLine::Text(NO_CONTENT.to_string())]
    } else {
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lines_drop_blank_and_trim() {
        let lines = text_lines_or_placeholder("  first \r\n\n\t\nsecond\n");
        assert_eq!(
            lines,
            vec![
                ContentLine::Text("first".into()),
                ContentLine::Text("second".into())
            ]
        );
    }

    #[test]
    fn test_text_lines_placeholder() {
        assert_eq!(
            text_lines_or_placeholder(" \n\t \n"),
            vec![ContentLine::Text(NO_CONTENT.into())]
        );
        assert_eq!(
            text_lines_or_placeholder(""),
            vec![ContentLine::Text(NO_CONTENT.into())]
        );
    }

    #[test]
    fn test_image_info_block() {
        let info = ImageInfo {
            format: "PNG".into(),
            width: 640,
            height: 480,
            mode: "RGBA".into(),
            file_name: "logo.png".into(),
        };
        let texts: Vec<String> = info.lines().iter().map(|l| l.text().to_string()).collect();
        assert_eq!(
            texts,
            vec![
                "Image Information:",
                "Format: PNG",
                "Size: 640 x 480 pixels",
                "Mode: RGBA",
                "File: logo.png"
            ]
        );
    }
}
