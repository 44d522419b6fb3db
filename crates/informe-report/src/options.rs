//! Per-run assembly configuration.

use std::path::PathBuf;

use informe_assets::collage::DEFAULT_COLLAGE_SIZE_PX;
use informe_assets::recovery::RecoveryConfig;
use informe_assets::sizing::SizingRules;

/// Everything one assembly run needs besides the request itself.
///
/// `asset_root` is both where asset paths resolve and where transient PNGs
/// are written; the surrounding platform owns that directory.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// Root directory for asset resolution and transient files.
    pub asset_root: PathBuf,
    /// Banded-fit rules used by the narrative variant and collage cells.
    pub sizing: SizingRules,
    /// Recovery cascade configuration.
    pub recovery: RecoveryConfig,
    /// Edge length of collage composites, in pixels.
    pub collage_size_px: u32,
    /// Explicit run stamp for transient names; `None` uses the wall clock.
    ///
    /// Concurrent runs must not share a stamp, so production callers leave
    /// this unset. Tests pin it to make transient paths predictable.
    pub run_stamp: Option<String>,
}

impl AssemblyOptions {
    /// Options with platform defaults, rooted at `asset_root`.
    #[must_use]
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
            sizing: SizingRules::new(),
            recovery: RecoveryConfig::new(),
            collage_size_px: DEFAULT_COLLAGE_SIZE_PX,
            run_stamp: None,
        }
    }

    /// Override the sizing rules.
    #[must_use]
    pub fn with_sizing(mut self, sizing: SizingRules) -> Self {
        self.sizing = sizing;
        self
    }

    /// Override the recovery configuration.
    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryConfig) -> Self {
        self.recovery = recovery;
        self
    }

    /// Override the collage canvas size.
    #[must_use]
    pub fn with_collage_size_px(mut self, size_px: u32) -> Self {
        self.collage_size_px = size_px;
        self
    }

    /// Pin the run stamp used for transient filenames.
    #[must_use]
    pub fn with_run_stamp(mut self, stamp: impl Into<String>) -> Self {
        self.run_stamp = Some(stamp.into());
        self
    }
}
