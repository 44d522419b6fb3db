//! Synthetic stand-in raster for assets that cannot be recovered.
//!
//! The card is drawn entirely from stroke segments so the crate ships no font
//! asset. It only needs the letters of its fixed label.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use informe_core::{DecodedImage, Provenance};

/// Placeholder canvas width in pixels.
pub const PLACEHOLDER_WIDTH: u32 = 360;
/// Placeholder canvas height in pixels.
pub const PLACEHOLDER_HEIGHT: u32 = 180;
/// Label stamped across the card.
pub const PLACEHOLDER_TEXT: &str = "FIRMA DIGITAL";

const BORDER_THICKNESS: u32 = 3;
const BORDER_COLOR: Rgb<u8> = Rgb([96, 96, 96]);
const TEXT_COLOR: Rgb<u8> = Rgb([54, 54, 54]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

const GLYPH_WIDTH: f32 = 18.0;
const GLYPH_HEIGHT: f32 = 28.0;
const GLYPH_ADVANCE: f32 = 24.0;

/// One stroke of a glyph, in unit-box coordinates (y grows downward).
type Segment = ((f32, f32), (f32, f32));

const GLYPH_A: &[Segment] = &[
    ((0.0, 1.0), (0.5, 0.0)),
    ((0.5, 0.0), (1.0, 1.0)),
    ((0.2, 0.65), (0.8, 0.65)),
];
const GLYPH_D: &[Segment] = &[
    ((0.0, 0.0), (0.0, 1.0)),
    ((0.0, 0.0), (0.7, 0.0)),
    ((0.7, 0.0), (1.0, 0.3)),
    ((1.0, 0.3), (1.0, 0.7)),
    ((1.0, 0.7), (0.7, 1.0)),
    ((0.7, 1.0), (0.0, 1.0)),
];
const GLYPH_F: &[Segment] = &[
    ((0.0, 0.0), (0.0, 1.0)),
    ((0.0, 0.0), (1.0, 0.0)),
    ((0.0, 0.5), (0.75, 0.5)),
];
const GLYPH_G: &[Segment] = &[
    ((1.0, 0.0), (0.0, 0.0)),
    ((0.0, 0.0), (0.0, 1.0)),
    ((0.0, 1.0), (1.0, 1.0)),
    ((1.0, 1.0), (1.0, 0.5)),
    ((1.0, 0.5), (0.55, 0.5)),
];
const GLYPH_I: &[Segment] = &[
    ((0.0, 0.0), (1.0, 0.0)),
    ((0.0, 1.0), (1.0, 1.0)),
    ((0.5, 0.0), (0.5, 1.0)),
];
const GLYPH_L: &[Segment] = &[((0.0, 0.0), (0.0, 1.0)), ((0.0, 1.0), (1.0, 1.0))];
const GLYPH_M: &[Segment] = &[
    ((0.0, 1.0), (0.0, 0.0)),
    ((0.0, 0.0), (0.5, 0.6)),
    ((0.5, 0.6), (1.0, 0.0)),
    ((1.0, 0.0), (1.0, 1.0)),
];
const GLYPH_R: &[Segment] = &[
    ((0.0, 0.0), (0.0, 1.0)),
    ((0.0, 0.0), (0.9, 0.0)),
    ((0.9, 0.0), (0.9, 0.5)),
    ((0.9, 0.5), (0.0, 0.5)),
    ((0.45, 0.5), (1.0, 1.0)),
];
const GLYPH_T: &[Segment] = &[((0.0, 0.0), (1.0, 0.0)), ((0.5, 0.0), (0.5, 1.0))];

fn glyph_segments(c: char) -> &'static [Segment] {
    match c {
        'A' => GLYPH_A,
        'D' => GLYPH_D,
        'F' => GLYPH_F,
        'G' => GLYPH_G,
        'I' => GLYPH_I,
        'L' => GLYPH_L,
        'M' => GLYPH_M,
        'R' => GLYPH_R,
        'T' => GLYPH_T,
        _ => &[],
    }
}

/// Build the placeholder card.
///
/// White canvas, hollow border, centered stroke-drawn label. The result is
/// tagged [`Provenance::Placeholder`] so downstream consumers can tell it
/// apart from recovered pixel data.
#[must_use]
pub fn synthesize() -> DecodedImage {
    let mut canvas = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, BACKGROUND);

    for t in 0..BORDER_THICKNESS {
        let rect = Rect::at(t as i32, t as i32)
            .of_size(PLACEHOLDER_WIDTH - 2 * t, PLACEHOLDER_HEIGHT - 2 * t);
        draw_hollow_rect_mut(&mut canvas, rect, BORDER_COLOR);
    }

    let text_width = PLACEHOLDER_TEXT.chars().count() as f32 * GLYPH_ADVANCE
        - (GLYPH_ADVANCE - GLYPH_WIDTH);
    let origin_x = (PLACEHOLDER_WIDTH as f32 - text_width) / 2.0;
    let origin_y = (PLACEHOLDER_HEIGHT as f32 - GLYPH_HEIGHT) / 2.0;
    draw_label(&mut canvas, PLACEHOLDER_TEXT, origin_x, origin_y);

    DecodedImage::new(canvas, Provenance::Placeholder)
}

fn draw_label(canvas: &mut RgbImage, text: &str, origin_x: f32, origin_y: f32) {
    for (i, c) in text.chars().enumerate() {
        let cell_x = origin_x + i as f32 * GLYPH_ADVANCE;
        for &((x0, y0), (x1, y1)) in glyph_segments(c) {
            let start = (cell_x + x0 * GLYPH_WIDTH, origin_y + y0 * GLYPH_HEIGHT);
            let end = (cell_x + x1 * GLYPH_WIDTH, origin_y + y1 * GLYPH_HEIGHT);
            // Double-stroke for weight; single-pixel lines disappear once the
            // card is resampled down for display.
            draw_line_segment_mut(canvas, start, end, TEXT_COLOR);
            draw_line_segment_mut(canvas, (start.0 + 1.0, start.1), (end.0 + 1.0, end.1), TEXT_COLOR);
            draw_line_segment_mut(canvas, (start.0, start.1 + 1.0), (end.0, end.1 + 1.0), TEXT_COLOR);
        }
    }
}
