//! Square-grid collage composition.
//!
//! Members are thumbnailed into uniform cells on a white canvas. The grid
//! grows stepwise with the member count and anything beyond the largest grid
//! is dropped rather than shrinking the cells further.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use informe_core::{DecodedImage, ReportError, Result};

use crate::ledger::TempAssetLedger;
use crate::sizing::fit_within;

/// Default edge length of the square collage canvas, in pixels.
pub const DEFAULT_COLLAGE_SIZE_PX: u32 = 170;

const CANVAS_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Grid dimensions (columns, rows) for a member count.
///
/// Up to four members share a 2x2 grid, up to nine a 3x3, anything more a
/// 4x4. A count above sixteen does not grow the grid; the extras are dropped
/// at composition time.
#[must_use]
pub const fn grid_for(count: usize) -> (u32, u32) {
    if count <= 4 {
        (2, 2)
    } else if count <= 9 {
        (3, 3)
    } else {
        (4, 4)
    }
}

/// Compose `images` into a single collage raster.
///
/// Each member is fitted into its cell without upscaling and centered on
/// both axes. The composite is also materialized as a transient PNG through
/// `ledger`, mirroring how every other displayed raster leaves a file behind
/// for the duration of the run.
///
/// Returns [`ReportError::CollageInputEmpty`] when `images` is empty.
pub fn compose(
    images: &[DecodedImage],
    size_px: u32,
    ledger: &mut TempAssetLedger,
) -> Result<RgbImage> {
    if images.is_empty() {
        return Err(ReportError::CollageInputEmpty);
    }

    let (cols, rows) = grid_for(images.len());
    let cell = (size_px / cols.max(rows)).max(1);
    let capacity = (cols * rows) as usize;
    if images.len() > capacity {
        log::debug!(
            "collage has {} members, keeping the first {capacity}",
            images.len()
        );
    }

    let mut canvas = RgbImage::from_pixel(cell * cols, cell * rows, CANVAS_BACKGROUND);
    for (i, member) in images.iter().take(capacity).enumerate() {
        let col = i as u32 % cols;
        let row = i as u32 / cols;
        let (thumb_w, thumb_h) =
            fit_within(member.width(), member.height(), cell as f32, cell as f32).px_dims();
        let x = col * cell + (cell - thumb_w) / 2;
        let y = row * cell + (cell - thumb_h) / 2;
        if (thumb_w, thumb_h) == member.dimensions() {
            imageops::overlay(&mut canvas, member.pixels(), x as i64, y as i64);
        } else {
            let thumb = imageops::resize(member.pixels(), thumb_w, thumb_h, FilterType::Lanczos3);
            imageops::overlay(&mut canvas, &thumb, x as i64, y as i64);
        }
    }

    let path = ledger.materialize_png(&canvas, "collage")?;
    log::debug!(
        "composed {}x{} collage at {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use informe_core::Provenance;
    use tempfile::tempdir;

    const STAMP: &str = "20250101_120000";

    fn member(w: u32, h: u32, color: Rgb<u8>) -> DecodedImage {
        DecodedImage::new(RgbImage::from_pixel(w, h, color), Provenance::Original)
    }

    fn members(count: usize) -> Vec<DecodedImage> {
        (0..count)
            .map(|i| member(10, 10, Rgb([10 * i as u8, 0, 0])))
            .collect()
    }

    // ========== GRID TESTS ==========

    #[test]
    fn test_grid_steps() {
        assert_eq!(grid_for(1), (2, 2));
        assert_eq!(grid_for(4), (2, 2));
        assert_eq!(grid_for(5), (3, 3));
        assert_eq!(grid_for(9), (3, 3));
        assert_eq!(grid_for(10), (4, 4));
        assert_eq!(grid_for(17), (4, 4));
    }

    // ========== COMPOSITION TESTS ==========

    #[test]
    fn test_empty_members_rejected() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let err = compose(&[], DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap_err();
        assert!(matches!(err, ReportError::CollageInputEmpty));
        assert!(ledger.registered().is_empty(), "no transient on failure");
    }

    #[test]
    fn test_five_members_use_three_by_three_grid() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let canvas = compose(&members(5), DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap();
        // cell = 170 / 3 = 56, canvas = 56 * 3
        assert_eq!(canvas.dimensions(), (168, 168));
    }

    #[test]
    fn test_two_members_use_two_by_two_grid() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let canvas = compose(&members(2), DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap();
        assert_eq!(canvas.dimensions(), (170, 170));
    }

    #[test]
    fn test_member_centered_in_cell() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let red = Rgb([200, 0, 0]);
        let canvas =
            compose(&[member(40, 20, red)], DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap();

        // cell = 85; a 40x20 member is not upscaled, so it lands at
        // ((85 - 40) / 2, (85 - 20) / 2).
        assert_eq!(*canvas.get_pixel(22, 32), red);
        assert_eq!(*canvas.get_pixel(0, 0), CANVAS_BACKGROUND);
        assert_eq!(*canvas.get_pixel(120, 32), CANVAS_BACKGROUND, "second column empty");
    }

    #[test]
    fn test_oversized_member_downscaled_into_cell() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let canvas = compose(
            &[member(500, 300, Rgb([0, 0, 180]))],
            DEFAULT_COLLAGE_SIZE_PX,
            &mut ledger,
        )
        .unwrap();
        assert_eq!(canvas.dimensions(), (170, 170));
        // Thumb is 85x51 at (0, 17); the cell to its right stays empty.
        assert_ne!(*canvas.get_pixel(40, 40), CANVAS_BACKGROUND);
        assert_eq!(*canvas.get_pixel(120, 40), CANVAS_BACKGROUND);
    }

    #[test]
    fn test_extras_beyond_capacity_dropped() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let canvas = compose(&members(17), DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap();
        assert_eq!(canvas.dimensions(), (168, 168), "4x4 grid with 42px cells");

        // The 17th member's color never reaches the canvas.
        let seventeenth = Rgb([160, 0, 0]);
        assert!(
            canvas.pixels().all(|p| *p != seventeenth),
            "overflow member should be dropped"
        );
    }

    #[test]
    fn test_composite_materialized_through_ledger() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        compose(&members(2), DEFAULT_COLLAGE_SIZE_PX, &mut ledger).unwrap();

        assert_eq!(ledger.registered().len(), 1);
        let path = &ledger.registered()[0];
        assert!(path.exists());
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("collage_"), "got {name}");
    }
}
