//! Cursor-based page writer over a `lopdf` document.
//!
//! Content is laid out top-down: the cursor starts at the top margin and
//! every line, image or spacer moves it toward the bottom margin. When a
//! block would cross the bottom margin the current operations are flushed
//! into a finished page and the cursor resets. Pages share the standard
//! Helvetica family; images become per-page XObject resources.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use informe_core::{ImageContent, ReportError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::options::RenderOptions;
use crate::text::{estimate_width, win_ansi};

/// A4 page width in points.
pub const PAGE_WIDTH_PT: f32 = 595.0;
/// A4 page height in points.
pub const PAGE_HEIGHT_PT: f32 = 842.0;

/// Extra leading below a text line, as a fraction of the font size.
const LINE_LEADING: f32 = 0.4;

/// The three standard fonts every page declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    const fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }
}

/// Horizontal placement of a text line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

fn pdf_err(e: lopdf::Error) -> ReportError {
    ReportError::Rendering(e.to_string())
}

pub(crate) struct PageWriter {
    doc: Document,
    pages_id: ObjectId,
    margin: f32,
    jpeg_quality: u8,
    ops: Vec<Operation>,
    page_images: Vec<(String, ObjectId)>,
    cursor: f32,
    image_seq: usize,
    pages_flushed: usize,
}

impl PageWriter {
    pub(crate) fn new(options: &RenderOptions) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Self {
            doc,
            pages_id,
            margin: options.margin,
            jpeg_quality: options.jpeg_quality,
            ops: Vec::new(),
            page_images: Vec::new(),
            cursor: PAGE_HEIGHT_PT - options.margin,
            image_seq: 0,
            pages_flushed: 0,
        }
    }

    /// Usable line width between the margins.
    pub(crate) fn content_width(&self) -> f32 {
        PAGE_WIDTH_PT - 2.0 * self.margin
    }

    pub(crate) fn left_edge(&self) -> f32 {
        self.margin
    }

    /// Break the page if `needed` points do not fit above the bottom margin.
    ///
    /// A page that holds nothing yet never breaks; an oversized block is
    /// placed anyway rather than looping on empty pages.
    pub(crate) fn ensure_room(&mut self, needed: f32) -> Result<()> {
        if self.cursor - needed < self.margin && !self.ops.is_empty() {
            self.flush_page()?;
        }
        Ok(())
    }

    /// Consume `gap` points of vertical space.
    ///
    /// A gap that would cross the bottom margin turns into a page break
    /// instead; the remainder is not carried over, which is exactly how the
    /// one-per-page variant pushes each exhibit onto a fresh page region.
    pub(crate) fn spacer(&mut self, gap: f32) -> Result<()> {
        if self.cursor - gap < self.margin {
            if !self.ops.is_empty() {
                self.flush_page()?;
            }
        } else {
            self.cursor -= gap;
        }
        Ok(())
    }

    /// Draw one line built from `(font, text)` segments at `size` points.
    ///
    /// Segments continue on the same baseline, which is how bold field
    /// labels run into their regular-weight values.
    pub(crate) fn line_segments(
        &mut self,
        segments: &[(Font, &str)],
        size: f32,
        align: Align,
    ) -> Result<()> {
        let height = size * (1.0 + LINE_LEADING);
        self.ensure_room(height)?;

        let total_width: f32 = segments
            .iter()
            .map(|(_, text)| estimate_width(text, size))
            .sum();
        let x = match align {
            Align::Left => self.margin,
            Align::Center => ((PAGE_WIDTH_PT - total_width) / 2.0).max(self.margin),
            Align::Right => (PAGE_WIDTH_PT - self.margin - total_width).max(self.margin),
        };

        self.cursor -= size;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Td",
            vec![x.into(), self.cursor.into()],
        ));
        for (font, text) in segments {
            self.ops.push(Operation::new(
                "Tf",
                vec![font.resource_name().into(), size.into()],
            ));
            self.ops.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi(text), StringFormat::Literal)],
            ));
        }
        self.ops.push(Operation::new("ET", vec![]));
        self.cursor -= size * LINE_LEADING;
        Ok(())
    }

    /// Single-font convenience over [`Self::line_segments`].
    pub(crate) fn line(&mut self, text: &str, font: Font, size: f32, align: Align) -> Result<()> {
        self.line_segments(&[(font, text)], size, align)
    }

    /// Embed an image centered horizontally at its display size.
    pub(crate) fn image(&mut self, content: &ImageContent) -> Result<()> {
        let display = content.display;
        self.ensure_room(display.height)?;

        let (px_w, px_h) = content.pixels.dimensions();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.jpeg_quality)
            .encode(
                content.pixels.pixels().as_raw(),
                px_w,
                px_h,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| ReportError::Rendering(format!("JPEG encode failed: {e}")))?;

        let xobject_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(px_w),
                "Height" => i64::from(px_h),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));
        let name = format!("Im{}", self.image_seq);
        self.image_seq += 1;
        self.page_images.push((name.clone(), xobject_id));

        self.cursor -= display.height;
        let x = ((PAGE_WIDTH_PT - display.width) / 2.0).max(self.margin);
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                display.width.into(),
                0.into(),
                0.into(),
                display.height.into(),
                x.into(),
                self.cursor.into(),
            ],
        ));
        self.ops
            .push(Operation::new("Do", vec![name.as_str().into()]));
        self.ops.push(Operation::new("Q", vec![]));
        Ok(())
    }

    /// Finalize the current operations into a page object.
    fn flush_page(&mut self) -> Result<()> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let encoded = content.encode().map_err(pdf_err)?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), encoded));

        let mut fonts = Dictionary::new();
        for font in [Font::Regular, Font::Bold, Font::Oblique] {
            fonts.set(
                font.resource_name(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !self.page_images.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in self.page_images.drain(..) {
                xobjects.set(name, Object::Reference(id));
            }
            resources.set("XObject", xobjects);
        }

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
            "Contents" => content_id,
        });

        let pages = self
            .doc
            .get_object_mut(self.pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(pdf_err)?;
        let kids = pages
            .get_mut(b"Kids")
            .and_then(Object::as_array_mut)
            .map_err(pdf_err)?;
        kids.push(Object::Reference(page_id));

        self.pages_flushed += 1;
        self.cursor = PAGE_HEIGHT_PT - self.margin;
        log::trace!("flushed page {}", self.pages_flushed);
        Ok(())
    }

    /// Flush the tail page, fix up the page count and serialize the bytes.
    pub(crate) fn finish(mut self) -> Result<Vec<u8>> {
        if !self.ops.is_empty() || self.pages_flushed == 0 {
            self.flush_page()?;
        }

        let count = self.pages_flushed as i64;
        let pages = self
            .doc
            .get_object_mut(self.pages_id)
            .and_then(Object::as_dict_mut)
            .map_err(pdf_err)?;
        pages.set("Count", count);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| ReportError::Rendering(format!("PDF serialization failed: {e}")))?;
        log::debug!("rendered {count} pages, {} bytes", bytes.len());
        Ok(bytes)
    }
}
