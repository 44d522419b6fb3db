//! Transient asset bookkeeping.
//!
//! Every raster placed in a report is first materialized as a PNG next to the
//! source assets, mirroring the behaviour of the original platform. The
//! ledger owns those paths for the lifetime of one assembly run and removes
//! them all afterwards, whether the run succeeded or not.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use chrono::Local;
use image::RgbImage;
use informe_core::Result;

/// Timestamp component of every transient filename.
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Tracks transient PNG files created during one assembly run.
///
/// Paths are registered *before* the bytes hit disk, so a failed write still
/// leaves the ledger able to clean up whatever partial state exists. Dropping
/// a ledger with registered paths releases them as a backstop; normal flow
/// calls [`TempAssetLedger::release_all`] explicitly.
#[derive(Debug)]
pub struct TempAssetLedger {
    root: PathBuf,
    stamp: String,
    seq: u32,
    registered: Vec<PathBuf>,
}

impl TempAssetLedger {
    /// Ledger rooted at `root`, stamped with the current local time.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_stamp(root, Local::now().format(STAMP_FORMAT).to_string())
    }

    /// Ledger with an explicit run stamp. Deterministic filenames make
    /// transient paths predictable, which matters for tests.
    #[must_use]
    pub fn with_stamp(root: impl Into<PathBuf>, stamp: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            stamp: stamp.into(),
            seq: 0,
            registered: Vec::new(),
        }
    }

    /// The run stamp shared by every transient name of this ledger.
    #[inline]
    #[must_use]
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    /// Paths currently owned by the ledger, in registration order.
    #[inline]
    #[must_use]
    pub fn registered(&self) -> &[PathBuf] {
        &self.registered
    }

    /// Track an externally created path for cleanup.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.registered.push(path.into());
    }

    /// Reserve the next transient path for `prefix` and register it.
    ///
    /// The sequence counter is shared across prefixes, so names stay unique
    /// within a run even when prefixes repeat.
    pub fn allocate(&mut self, prefix: &str) -> PathBuf {
        self.seq += 1;
        let path = self
            .root
            .join(format!("{prefix}_{}_{:03}.png", self.stamp, self.seq));
        self.registered.push(path.clone());
        path
    }

    /// Encode `pixels` as PNG and write them to a freshly allocated
    /// transient path.
    pub fn materialize_png(&mut self, pixels: &RgbImage, prefix: &str) -> Result<PathBuf> {
        let path = self.allocate(prefix);
        let mut buffer = Vec::new();
        pixels
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&path, buffer)?;
        Ok(path)
    }

    /// Remove every registered file and forget it.
    ///
    /// Paths that are already gone are skipped silently; any other removal
    /// failure is logged and the sweep continues.
    pub fn release_all(&mut self) {
        for path in self.registered.drain(..) {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("failed to remove transient asset {}: {e}", path.display());
                }
            }
        }
    }
}

impl Drop for TempAssetLedger {
    fn drop(&mut self) {
        if !self.registered.is_empty() {
            self.release_all();
        }
    }
}

/// Whether `path` looks like a transient asset produced by a ledger run.
#[must_use]
pub fn is_transient_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    ["temp_", "firma_", "collage_"]
        .iter()
        .any(|prefix| name.starts_with(prefix))
        && name.ends_with(".png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use informe_core::ReportError;
    use tempfile::tempdir;

    const STAMP: &str = "20250101_120000";

    fn red_image(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([200, 30, 30]))
    }

    // ========== NAMING TESTS ==========

    #[test]
    fn test_new_stamp_has_expected_shape() {
        let ledger = TempAssetLedger::new("/tmp");
        let stamp = ledger.stamp();
        assert_eq!(stamp.len(), 15, "YYYYMMDD_HHMMSS is 15 chars: {stamp}");
        assert_eq!(&stamp[8..9], "_");
        assert!(
            stamp[..8].chars().all(|c| c.is_ascii_digit()),
            "date part should be digits: {stamp}"
        );
    }

    #[test]
    fn test_allocate_sequences_names_across_prefixes() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);

        let first = ledger.allocate("collage");
        let second = ledger.allocate("temp");

        assert_eq!(
            first,
            dir.path().join(format!("collage_{STAMP}_001.png"))
        );
        assert_eq!(second, dir.path().join(format!("temp_{STAMP}_002.png")));
        assert_eq!(ledger.registered().len(), 2);
    }

    #[test]
    fn test_is_transient_name() {
        assert!(is_transient_name(Path::new("temp_20250101_120000_001.png")));
        assert!(is_transient_name(Path::new("firma_20250101_120000_002.png")));
        assert!(is_transient_name(Path::new(
            "/assets/collage_20250101_120000_003.png"
        )));
        assert!(!is_transient_name(Path::new("photo.png")));
        assert!(!is_transient_name(Path::new("temp_copy.jpg")));
    }

    // ========== MATERIALIZATION TESTS ==========

    #[test]
    fn test_materialize_png_writes_png_bytes() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);

        let path = ledger.materialize_png(&red_image(4, 4), "temp").unwrap();
        assert!(path.exists());
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "PNG signature");
        assert_eq!(ledger.registered(), &[path]);
    }

    #[test]
    fn test_materialize_png_reports_write_failure() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);

        // Occupy the first transient path with a directory so the write fails.
        fs::create_dir(dir.path().join(format!("firma_{STAMP}_001.png"))).unwrap();
        let err = ledger.materialize_png(&red_image(2, 2), "firma").unwrap_err();
        assert!(matches!(err, ReportError::AssemblyIo(_)), "got {err:?}");
        // The failed path is still registered so cleanup can try it.
        assert_eq!(ledger.registered().len(), 1);
    }

    // ========== CLEANUP TESTS ==========

    #[test]
    fn test_release_all_removes_files_and_drains() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        let a = ledger.materialize_png(&red_image(2, 2), "temp").unwrap();
        let b = ledger.materialize_png(&red_image(2, 2), "collage").unwrap();

        ledger.release_all();

        assert!(!a.exists());
        assert!(!b.exists());
        assert!(ledger.registered().is_empty());
    }

    #[test]
    fn test_release_all_skips_missing_files() {
        let dir = tempdir().unwrap();
        let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
        ledger.register(dir.path().join("never_written.png"));
        ledger.release_all();
        assert!(ledger.registered().is_empty());
    }

    #[test]
    fn test_drop_releases_leftovers() {
        let dir = tempdir().unwrap();
        let path;
        {
            let mut ledger = TempAssetLedger::with_stamp(dir.path(), STAMP);
            path = ledger.materialize_png(&red_image(2, 2), "temp").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists(), "drop backstop should remove the file");
    }
}
