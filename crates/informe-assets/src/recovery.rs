//! Never-failing asset decoding.
//!
//! [`decode`] runs a fixed cascade of recovery strategies over a raw blob and
//! always produces usable pixels: clean rasters pass straight through,
//! base64-wrapped payloads are unwrapped, damaged containers are truncated at
//! their structural end markers, and anything still unreadable (or decoded
//! but effectively blank) is replaced by the synthetic placeholder card.
//!
//! The caller never sees a decode error. Failure shows up only as
//! [`Provenance::Placeholder`] on the result.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{imageops, ImageReader, RgbImage};
use informe_core::{DecodedImage, Provenance};

use crate::placeholder;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Knobs of the blank-image gate.
///
/// A decoded raster whose non-blank fraction falls below
/// `min_content_fraction` is discarded in favour of the placeholder; a pixel
/// counts as blank when its grayscale value is at or above
/// `near_white_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveryConfig {
    /// Grayscale values at or above this count as blank.
    pub near_white_threshold: u8,
    /// Minimum fraction of non-blank pixels for a decode to stand.
    pub min_content_fraction: f32,
}

impl RecoveryConfig {
    /// Platform defaults: threshold 245, minimum fraction 0.5%.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            near_white_threshold: 245,
            min_content_fraction: 0.005,
        }
    }

    /// Override the near-white threshold.
    #[inline]
    #[must_use]
    pub const fn with_near_white_threshold(mut self, threshold: u8) -> Self {
        self.near_white_threshold = threshold;
        self
    }

    /// Override the minimum content fraction.
    #[inline]
    #[must_use]
    pub const fn with_min_content_fraction(mut self, fraction: f32) -> Self {
        self.min_content_fraction = fraction;
        self
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the recovery cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Feed the blob to the raster decoders as-is.
    DirectRaster,
    /// Treat the blob as base64 text (optionally a data URL), clean it up
    /// and decode the unwrapped bytes.
    Base64Text,
    /// Truncate a PNG stream at its IEND chunk, dropping trailing garbage.
    PngChunkRepair,
    /// Truncate a JPEG stream at its last EOI marker.
    JpegMarkerRepair,
}

impl RecoveryStrategy {
    /// The cascade, in the order strategies are attempted.
    pub const CASCADE: [Self; 4] = [
        Self::DirectRaster,
        Self::Base64Text,
        Self::PngChunkRepair,
        Self::JpegMarkerRepair,
    ];

    /// Short name used in log lines.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DirectRaster => "direct",
            Self::Base64Text => "base64",
            Self::PngChunkRepair => "png-repair",
            Self::JpegMarkerRepair => "jpeg-repair",
        }
    }

    /// Provenance tag carried by images this strategy produces. Strategies
    /// that hand the decoder untouched payload bytes yield original pixels;
    /// the container-repair strategies yield reconstructed ones.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        match self {
            Self::DirectRaster | Self::Base64Text => Provenance::Original,
            Self::PngChunkRepair | Self::JpegMarkerRepair => Provenance::Reconstructed,
        }
    }

    /// Run this strategy over `blob`.
    #[must_use]
    pub fn attempt(&self, blob: &[u8]) -> Option<RgbImage> {
        match self {
            Self::DirectRaster => parse_raster(blob),
            Self::Base64Text => {
                let decoded = normalize_base64(blob)?;
                parse_raster(&decoded)
            }
            Self::PngChunkRepair => {
                let candidate = signature_candidate(blob, &PNG_SIGNATURE)?;
                let repaired = repair_png(&candidate)?;
                parse_raster(&repaired)
            }
            Self::JpegMarkerRepair => {
                let candidate = signature_candidate(blob, &JPEG_SIGNATURE)?;
                let repaired = repair_jpeg(&candidate)?;
                parse_raster(&repaired)
            }
        }
    }
}

/// Decode `blob` into displayable pixels, no matter what.
///
/// Strategies run in cascade order; the first that yields pixels wins. A
/// winning decode that fails the blank gate short-circuits to the
/// placeholder, since the remaining strategies would only reproduce the same
/// payload.
#[must_use]
pub fn decode(blob: &[u8], config: &RecoveryConfig) -> DecodedImage {
    for strategy in RecoveryStrategy::CASCADE {
        let Some(pixels) = strategy.attempt(blob) else {
            continue;
        };
        let fraction = content_fraction(&pixels, config.near_white_threshold);
        if fraction < config.min_content_fraction {
            log::warn!(
                "asset decoded via {} is {:.2}% non-blank; substituting placeholder",
                strategy.name(),
                fraction * 100.0
            );
            break;
        }
        log::debug!(
            "asset recovered via {} ({}x{} px)",
            strategy.name(),
            pixels.width(),
            pixels.height()
        );
        return DecodedImage::new(pixels, strategy.provenance());
    }
    log::debug!("asset unrecoverable; substituting placeholder");
    placeholder::synthesize()
}

/// Fraction of pixels darker than `near_white_threshold` after grayscale
/// conversion.
#[must_use]
pub fn content_fraction(pixels: &RgbImage, near_white_threshold: u8) -> f32 {
    let total = pixels.width() as u64 * pixels.height() as u64;
    if total == 0 {
        return 0.0;
    }
    let gray = imageops::grayscale(pixels);
    let marked = gray
        .pixels()
        .filter(|p| p.0[0] < near_white_threshold)
        .count();
    marked as f32 / total as f32
}

/// Decode raster bytes through the format-guessing reader, normalized to RGB.
fn parse_raster(bytes: &[u8]) -> Option<RgbImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let decoded = reader.decode().ok()?;
    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return None;
    }
    Some(rgb)
}

/// Clean up base64 text and decode it.
///
/// Accepts data URLs (payload after the first comma), strips whitespace and
/// any other non-alphabet bytes, and restores padding. A cleaned length of
/// `4k + 1` cannot come from valid base64, so one trailing character is
/// dropped before padding.
fn normalize_base64(bytes: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(bytes).ok()?;
    let payload = text.split_once(',').map_or(text, |(_, rest)| rest);
    let mut cleaned: String = payload
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.len() % 4 == 1 {
        cleaned.pop();
    }
    let remainder = cleaned.len() % 4;
    if remainder != 0 {
        for _ in remainder..4 {
            cleaned.push('=');
        }
    }
    STANDARD.decode(cleaned).ok()
}

/// Pick the byte layer a container repair should run on: the blob itself if
/// it already starts with `signature`, otherwise its base64-decoded form.
fn signature_candidate(blob: &[u8], signature: &[u8]) -> Option<Vec<u8>> {
    if blob.starts_with(signature) {
        return Some(blob.to_vec());
    }
    let decoded = normalize_base64(blob)?;
    decoded.starts_with(signature).then_some(decoded)
}

/// Walk the PNG chunk list and truncate the stream right after IEND.
///
/// Returns `None` when the signature is wrong, a chunk overruns the buffer
/// or no IEND chunk exists.
fn repair_png(bytes: &[u8]) -> Option<Vec<u8>> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return None;
    }
    let mut pos = PNG_SIGNATURE.len();
    while pos + 8 <= bytes.len() {
        let len = u32::from_be_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
            as usize;
        let chunk_type = &bytes[pos + 4..pos + 8];
        // length + type + data + crc
        let end = pos.checked_add(8)?.checked_add(len)?.checked_add(4)?;
        if end > bytes.len() {
            return None;
        }
        if chunk_type == b"IEND" {
            return Some(bytes[..end].to_vec());
        }
        pos = end;
    }
    None
}

/// Truncate a JPEG stream right after its last EOI marker.
fn repair_jpeg(bytes: &[u8]) -> Option<Vec<u8>> {
    if !bytes.starts_with(&JPEG_SIGNATURE) {
        return None;
    }
    let pos = bytes.windows(2).rposition(|w| w == [0xFF, 0xD9])?;
    Some(bytes[..pos + 2].to_vec())
}
