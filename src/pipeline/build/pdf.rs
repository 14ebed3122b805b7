//! PDF generation via lopdf.
//!
//! A small flowing layout: a centred title, a spacer, then one wrapped
//! paragraph per content line, paginated on US Letter. Image sources are
//! drawn into a fixed box under the title instead of text.
//!
//! Text uses the standard Helvetica family with `WinAnsiEncoding`, so no font
//! files are embedded. Characters outside that encoding are written as `?`.

use super::Draft;
use crate::config::ConversionConfig;
use crate::content::{ContentLine, ExtractedContent, ExtractedImage};
use crate::error::StageError;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use tracing::debug;

// ── Page geometry (points) ───────────────────────────────────────────────

pub(crate) const PAGE_WIDTH: f32 = 612.0;
pub(crate) const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

/// Longest edge, in pixels, of an embedded image. Larger images are
/// downsampled first; the PDF box is only a few hundred points wide.
const MAX_EMBED_PIXELS: u32 = 1600;

// ── Styles ───────────────────────────────────────────────────────────────

/// The three standard fonts the builder uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    /// Approximate advance width of `text` at `size` points.
    fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(helvetica_width).sum();
        let scale = if self == Font::Bold { 1.08 } else { 1.0 };
        units as f32 * size * scale / 1000.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: f32,
    centred: bool,
    space_after: f32,
}

const TITLE: Style = Style {
    font: Font::Bold,
    size: 18.0,
    centred: true,
    space_after: 12.0,
};
const HEADING: Style = Style {
    font: Font::Bold,
    size: 14.0,
    centred: false,
    space_after: 6.0,
};
const BODY: Style = Style {
    font: Font::Regular,
    size: 10.0,
    centred: false,
    space_after: 6.0,
};
const NOTE: Style = Style {
    font: Font::Oblique,
    size: 10.0,
    centred: false,
    space_after: 6.0,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Render a draft as a PDF.
pub fn build(draft: &Draft<'_>, config: &ConversionConfig) -> Result<Vec<u8>, StageError> {
    let mut canvas = PdfCanvas::new();
    canvas.paragraph(TITLE, draft.title);

    match draft.content {
        ExtractedContent::Image(img) => {
            canvas.image(img, config.image_width, config.image_height)?;
        }
        ExtractedContent::Lines(lines) => {
            for line in lines {
                match line {
                    ContentLine::Heading(t) => canvas.paragraph(HEADING, t),
                    ContentLine::Text(t) => canvas.paragraph(BODY, t),
                    ContentLine::Marker(t) => canvas.paragraph(NOTE, t),
                    ContentLine::Blank => canvas.space(12.0),
                }
            }
        }
    }

    canvas.finish(draft.title)
}

// ── Canvas ───────────────────────────────────────────────────────────────

/// An in-memory page list with a top-down text cursor.
pub(crate) struct PdfCanvas {
    pages: Vec<Vec<Operation>>,
    cursor_y: f32,
    images: Vec<Stream>,
}

impl PdfCanvas {
    pub(crate) fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor_y: PAGE_HEIGHT - MARGIN,
            images: Vec::new(),
        }
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = PAGE_HEIGHT - MARGIN;
    }

    /// Draw a single run of text with its baseline at `(x, y)`.
    pub(crate) fn text_at(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let ops = [
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.resource().into()), real(size)]),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ];
        self.current_page().extend(ops);
    }

    /// Wrap `text` to `width` and draw it downward from `(x, y)`, without
    /// paginating. Returns the baseline of the last line.
    pub(crate) fn text_block(&mut self, font: Font, size: f32, x: f32, y: f32, width: f32, text: &str) -> f32 {
        let mut baseline = y;
        for (i, line) in wrap(text, font, size, width).iter().enumerate() {
            if i > 0 {
                baseline -= size * 1.2;
            }
            self.text_at(font, size, x, baseline, line);
        }
        baseline
    }

    fn paragraph(&mut self, style: Style, text: &str) {
        let leading = style.size * 1.2;
        for line in wrap(text, style.font, style.size, CONTENT_WIDTH) {
            if self.cursor_y - leading < MARGIN {
                self.new_page();
            }
            self.cursor_y -= leading;
            let x = if style.centred {
                MARGIN + (CONTENT_WIDTH - style.font.text_width(&line, style.size)).max(0.0) / 2.0
            } else {
                MARGIN
            };
            let y = self.cursor_y;
            self.text_at(style.font, style.size, x, y, &line);
        }
        self.cursor_y -= style.space_after;
    }

    fn space(&mut self, height: f32) {
        self.cursor_y -= height;
    }

    /// Draw `img` stretched into a `width` × `height` box, centred horizontally.
    fn image(&mut self, img: &ExtractedImage, width: f32, height: f32) -> Result<(), StageError> {
        if self.cursor_y - height < MARGIN {
            self.new_page();
        }
        let stream = image_xobject(&img.pixels)?;
        self.images.push(stream);
        let name = format!("Im{}", self.images.len());

        let x = MARGIN + (CONTENT_WIDTH - width).max(0.0) / 2.0;
        let y = self.cursor_y - height;
        let ops = [
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ];
        self.current_page().extend(ops);
        self.cursor_y = y;
        Ok(())
    }

    /// Serialise the pages into a complete PDF file.
    pub(crate) fn finish(self, title: &str) -> Result<Vec<u8>, StageError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for font in Font::ALL {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource(), id);
        }
        let mut xobjects = Dictionary::new();
        for (i, stream) in self.images.into_iter().enumerate() {
            let id = doc.add_object(stream);
            xobjects.set(format!("Im{}", i + 1), id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let page_count = self.pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for ops in self.pages {
            let content = Content { operations: ops }.encode()?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
                "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(title)),
            "Producer" => Object::string_literal(concat!("docmorph ", env!("CARGO_PKG_VERSION"))),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf)
            .map_err(|e| StageError::PdfWrite(e.to_string()))?;
        debug!("PDF built: {} pages, {} bytes", page_count, buf.len());
        Ok(buf)
    }
}

fn real(v: f32) -> Object {
    Object::Real(v.into())
}

/// Build a Flate-compressed RGB image XObject.
fn image_xobject(img: &DynamicImage) -> Result<Stream, StageError> {
    let img = if img.width() > MAX_EMBED_PIXELS || img.height() > MAX_EMBED_PIXELS {
        img.thumbnail(MAX_EMBED_PIXELS, MAX_EMBED_PIXELS)
    } else {
        img.clone()
    };
    let rgb = img.to_rgb8();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(rgb.as_raw())
        .and_then(|_| encoder.flush())
        .map_err(|e| StageError::PdfWrite(format!("image compression: {e}")))?;
    let data = encoder
        .finish()
        .map_err(|e| StageError::PdfWrite(format!("image compression: {e}")))?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => rgb.width() as i64,
        "Height" => rgb.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, data))
}

// ── Text helpers ─────────────────────────────────────────────────────────

/// Greedy word wrap. Words wider than the line are broken by character.
fn wrap(text: &str, font: Font, size: f32, width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        // The word alone may still overflow.
        for ch in word.chars() {
            current.push(ch);
            if font.text_width(&current, size) > width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a `WinAnsiEncoding` font.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Helvetica advance widths (1/1000 em) for printable ASCII.
fn helvetica_width(c: char) -> u32 {
    const ASCII: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
        278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
        278, 278, 278, 469, 556, 333, // '['..'`'
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
        334, 260, 334, 584, // '{'..'~'
    ];
    match c {
        ' '..='~' => ASCII[c as usize - 0x20] as u32,
        _ => 556,
    }
}
