//! Rendering configuration.

/// Physical rendering knobs for one document.
///
/// The flow already fixed block order and image display sizes; what remains
/// configurable here is the page margin (each assembly variant carries its
/// own) and the quality of the JPEG re-encode used for embedded images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Uniform page margin in points.
    pub margin: f32,
    /// Quality passed to the DCT encoder for image XObjects, 1-100.
    pub jpeg_quality: u8,
}

impl RenderOptions {
    /// Options with the default 50 pt margin and quality 90.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            margin: 50.0,
            jpeg_quality: 90,
        }
    }

    /// Override the page margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Override the JPEG quality.
    #[must_use]
    pub const fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}
