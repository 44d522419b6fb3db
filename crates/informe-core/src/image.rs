//! Decoded image and layout types shared by the asset pipeline.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a decoded image, used for diagnostics.
///
/// Every image that reaches layout carries one of these tags so logs (and the
/// `recover` CLI subcommand) can tell how hard the decoder had to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The blob parsed as a raster image directly, or after base64
    /// normalization of a text payload.
    Original,
    /// The blob parsed only after byte-level container repair (truncation at
    /// the terminal PNG chunk or the last JPEG end-of-image marker).
    Reconstructed,
    /// The synthesized fallback canvas; no usable pixels survived.
    Placeholder,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Original => "original",
            Self::Reconstructed => "reconstructed",
            Self::Placeholder => "placeholder",
        };
        write!(f, "{name}")
    }
}

/// An owned, guaranteed-valid raster image produced by the recovery decoder.
///
/// The pixel buffer is always RGB and never aliases the source blob; width
/// and height are strictly positive.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbImage,
    provenance: Provenance,
}

impl DecodedImage {
    /// Wrap an RGB buffer with its provenance tag.
    #[must_use]
    pub fn new(pixels: RgbImage, provenance: Provenance) -> Self {
        Self { pixels, provenance }
    }

    /// Native width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Native height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Native `(width, height)` in pixels.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// How this image was obtained.
    #[inline]
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Borrow the pixel buffer.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Consume and return the pixel buffer.
    #[must_use]
    pub fn into_pixels(self) -> RgbImage {
        self.pixels
    }
}

/// Display dimensions in PDF points, aspect ratio preserved by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    /// Display width in points.
    pub width: f32,
    /// Display height in points.
    pub height: f32,
}

impl LayoutBox {
    /// Create a layout box from explicit point dimensions.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Integer pixel dimensions for resampling, truncated like the display
    /// math downstream, floored at 1 so the raster never collapses.
    #[must_use]
    pub fn px_dims(&self) -> (u32, u32) {
        let w = (self.width as u32).max(1);
        let h = (self.height as u32).max(1);
        (w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn white_image(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    #[test]
    fn test_provenance_display() {
        assert_eq!(Provenance::Original.to_string(), "original");
        assert_eq!(Provenance::Reconstructed.to_string(), "reconstructed");
        assert_eq!(Provenance::Placeholder.to_string(), "placeholder");
    }

    #[test]
    fn test_provenance_serde_round_trip() {
        let json = serde_json::to_string(&Provenance::Reconstructed).unwrap();
        assert_eq!(json, "\"reconstructed\"");
        let back: Provenance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Provenance::Reconstructed);
    }

    #[test]
    fn test_decoded_image_dimensions() {
        let img = DecodedImage::new(white_image(120, 80), Provenance::Original);
        assert_eq!(img.width(), 120);
        assert_eq!(img.height(), 80);
        assert_eq!(img.dimensions(), (120, 80));
        assert_eq!(img.provenance(), Provenance::Original);
    }

    #[test]
    fn test_layout_box_px_dims_truncates() {
        let layout = LayoutBox::new(170.1, 85.05);
        assert_eq!(layout.px_dims(), (170, 85));
    }

    #[test]
    fn test_layout_box_px_dims_never_zero() {
        let layout = LayoutBox::new(0.4, 0.9);
        assert_eq!(layout.px_dims(), (1, 1), "degenerate boxes clamp to 1x1");
    }
}
