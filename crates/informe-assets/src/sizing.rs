//! Aspect-ratio classification and display sizing.
//!
//! All outputs are display dimensions in PDF points; pixel truncation happens
//! later, when an image is actually resampled. Nothing here touches the
//! filesystem.

use informe_core::LayoutBox;

/// Points per centimeter at PDF resolution (1 pt = 1/72 in).
pub const POINTS_PER_CM: f32 = 28.35;

/// Default physical cap for the orientation-banded fit, in centimeters.
/// 6 cm comes to roughly 170 points on the page.
pub const DEFAULT_MAX_CM: f32 = 6.0;

/// Orientation class of a raster, decided from its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Aspect ratio inside the near-square band.
    Square,
    /// Wider than the upper band edge.
    Horizontal,
    /// Everything else, including exact band-edge ties.
    Vertical,
}

/// Tunable constants of the banded fit.
///
/// The band edges are empirically chosen values carried over from the
/// original platform; they are kept configurable rather than being given an
/// invented rationale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingRules {
    /// Physical-to-page unit conversion factor.
    pub points_per_cm: f32,
    /// Maximum physical extent of the dominant dimension, in centimeters.
    pub max_cm: f32,
    /// Lower aspect edge of the square band.
    pub band_low: f32,
    /// Upper aspect edge of the square band.
    pub band_high: f32,
}

impl SizingRules {
    /// Rules with the platform defaults (6 cm cap, 0.9/1.1 band).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points_per_cm: POINTS_PER_CM,
            max_cm: DEFAULT_MAX_CM,
            band_low: 0.9,
            band_high: 1.1,
        }
    }

    /// Override the physical cap.
    #[inline]
    #[must_use]
    pub const fn with_max_cm(mut self, max_cm: f32) -> Self {
        self.max_cm = max_cm;
        self
    }

    /// Override the square-band edges.
    #[inline]
    #[must_use]
    pub const fn with_band(mut self, low: f32, high: f32) -> Self {
        self.band_low = low;
        self.band_high = high;
        self
    }

    /// The cap converted to points.
    #[inline]
    #[must_use]
    pub fn cap_points(&self) -> f32 {
        self.max_cm * self.points_per_cm
    }

    /// Classify an aspect ratio.
    ///
    /// Checks run square, then horizontal, then vertical; comparisons are
    /// strict, so an aspect exactly on a band edge falls through to
    /// [`Orientation::Vertical`].
    #[must_use]
    pub fn classify(&self, aspect: f32) -> Orientation {
        if aspect > self.band_low && aspect < self.band_high {
            Orientation::Square
        } else if aspect > self.band_high {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl Default for SizingRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Banded orientation fit.
///
/// Square images cap both sides at the full physical maximum; horizontal
/// images cap width at the maximum and height at half of it; vertical images
/// mirror the horizontal case. Bounds are applied in order (dominant
/// dimension first) with uniform rescaling, so both end up satisfied and the
/// aspect ratio is exact. Images inside all caps are returned unscaled;
/// nothing is ever upscaled.
#[must_use]
pub fn fit(native_w: u32, native_h: u32, rules: &SizingRules) -> LayoutBox {
    let w = native_w.max(1) as f32;
    let h = native_h.max(1) as f32;
    let cap = rules.cap_points();

    match rules.classify(w / h) {
        Orientation::Square => {
            if w > cap {
                let scale = cap / w;
                LayoutBox::new(w * scale, h * scale)
            } else {
                LayoutBox::new(w, h)
            }
        }
        Orientation::Horizontal => clamp_ordered(w, h, cap, cap / 2.0),
        Orientation::Vertical => {
            let clamped = clamp_ordered(h, w, cap, cap / 2.0);
            LayoutBox::new(clamped.height, clamped.width)
        }
    }
}

/// Clamp the dominant dimension to `max_major`, then the other to
/// `max_minor`, rescaling uniformly each time.
fn clamp_ordered(major: f32, minor: f32, max_major: f32, max_minor: f32) -> LayoutBox {
    let mut out_major = major;
    let mut out_minor = minor;
    if out_major > max_major {
        let scale = max_major / out_major;
        out_major *= scale;
        out_minor *= scale;
    }
    if out_minor > max_minor {
        let scale = max_minor / out_minor;
        out_major *= scale;
        out_minor *= scale;
    }
    LayoutBox::new(out_major, out_minor)
}

/// Plain bounded fit: uniform scale into `max_w` × `max_h`, aspect ratio
/// preserved, never upscaling.
///
/// Used for the per-variant photo caps, logo fitting and collage cells.
#[must_use]
pub fn fit_within(native_w: u32, native_h: u32, max_w: f32, max_h: f32) -> LayoutBox {
    let w = native_w.max(1) as f32;
    let h = native_h.max(1) as f32;
    let scale = (max_w / w).min(max_h / h).min(1.0);
    LayoutBox::new(w * scale, h * scale)
}
