//! Page-flow block model.
//!
//! The assembler emits an ordered sequence of these blocks; a rendering
//! backend turns the sequence into a paginated binary document. The blocks
//! describe flow order and physical sizes, never output-format bytes.

use crate::image::{DecodedImage, LayoutBox};

/// A decoded raster together with the point dimensions it is displayed at.
#[derive(Debug, Clone)]
pub struct ImageContent {
    /// Final pixels to embed (already resampled when the display box shrank
    /// the native size).
    pub pixels: DecodedImage,
    /// Display size in points.
    pub display: LayoutBox,
}

/// One element of the page flow, in emission order.
#[derive(Debug, Clone)]
pub enum FlowBlock {
    /// Top banner: optional logo, centered document title, right-aligned
    /// version/date lines (newline-separated).
    Header {
        /// Logo image when the request supplied one that resolved.
        logo: Option<ImageContent>,
        /// Centered title, e.g. "INFORME DE ACTIVIDADES".
        title: String,
        /// Right column text, newline-separated lines.
        aside: String,
    },
    /// Section heading, e.g. "ESTADO: ABIERTA" or "Conclusiones".
    SectionHeader(String),
    /// Numbered sub-heading for one record.
    Subsection(String),
    /// Plain body text.
    Paragraph(String),
    /// One "«label»: value" line with a bold label.
    Field {
        /// Bold label without the trailing colon.
        label: String,
        /// Value text.
        value: String,
    },
    /// Several label/value pairs on a single line, pipe-separated.
    FieldRow(Vec<(String, String)>),
    /// An embedded image, horizontally centered at its display size.
    Image(ImageContent),
    /// Caption line for the nearest image.
    Caption(String),
    /// Vertical gap in points.
    Spacer(f32),
    /// Trailing footer text, newline-separated lines, centered.
    Footer(String),
}

/// Ordered flow-block sequence for one assembled report.
#[derive(Debug, Clone, Default)]
pub struct OutputDocument {
    blocks: Vec<FlowBlock>,
}

impl OutputDocument {
    /// Empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one block.
    pub fn push(&mut self, block: FlowBlock) {
        self.blocks.push(block);
    }

    /// All blocks in emission order.
    #[must_use]
    pub fn blocks(&self) -> &[FlowBlock] {
        &self.blocks
    }

    /// Number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when no block was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Section header texts, in order.
    pub fn section_headers(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            FlowBlock::SectionHeader(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Subsection texts, in order.
    pub fn subsections(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            FlowBlock::Subsection(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Caption texts, in order.
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| match b {
            FlowBlock::Caption(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Embedded images, in order (header logos not included).
    pub fn images(&self) -> impl Iterator<Item = &ImageContent> {
        self.blocks.iter().filter_map(|b| match b {
            FlowBlock::Image(content) => Some(content),
            _ => None,
        })
    }
}
