//! Raster asset handling for report assembly.
//!
//! This crate turns whatever bytes a report references into pixels that are
//! safe to place on a page:
//!
//! - [`sizing`] — aspect-ratio banding and display-size fitting
//! - [`recovery`] — the never-failing decode cascade
//! - [`placeholder`] — the synthetic card substituted for lost assets
//! - [`collage`] — square-grid composition of multiple rasters
//! - [`ledger`] — transient PNG bookkeeping and cleanup
//!
//! The central guarantee lives in [`recovery::decode`]: it always returns a
//! displayable image, downgrading gracefully from original pixels through
//! container repair to the placeholder card.

pub mod collage;
pub mod ledger;
pub mod placeholder;
pub mod recovery;
pub mod sizing;

pub use collage::{compose, grid_for, DEFAULT_COLLAGE_SIZE_PX};
pub use ledger::TempAssetLedger;
pub use placeholder::{synthesize, PLACEHOLDER_HEIGHT, PLACEHOLDER_TEXT, PLACEHOLDER_WIDTH};
pub use recovery::{content_fraction, decode, RecoveryConfig, RecoveryStrategy};
pub use sizing::{fit, fit_within, Orientation, SizingRules};
