//! Run-scoped assembly state and helpers shared by the variants.
//!
//! Caption numbering and the transient ledger live here, per run, never in
//! globals; two concurrent assemblies only ever share the asset directory,
//! and the ledger's stamped filenames keep them from colliding there.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use image::imageops::{self, FilterType};
use image::RgbImage;
use informe_assets::ledger::TempAssetLedger;
use informe_assets::sizing::fit_within;
use informe_assets::{collage, recovery};
use informe_core::{
    DecodedImage, ImageContent, LayoutBox, Provenance, RecordView, ReportMeta, Result,
};

use crate::options::AssemblyOptions;

/// Centered document title used by every variant.
pub(crate) const REPORT_TITLE: &str = "INFORME DE ACTIVIDADES";
/// Platform branding line used in header subtitles and footers.
pub(crate) const PLATFORM_NAME: &str = "Plataforma de Incidencias";

/// Mutable state of one assembly run.
pub(crate) struct RunContext<'a> {
    options: &'a AssemblyOptions,
    ledger: TempAssetLedger,
    caption_seq: u32,
    generated_at: NaiveDateTime,
}

impl<'a> RunContext<'a> {
    pub(crate) fn new(options: &'a AssemblyOptions, meta: &ReportMeta) -> Self {
        let ledger = match &options.run_stamp {
            Some(stamp) => TempAssetLedger::with_stamp(&options.asset_root, stamp.clone()),
            None => TempAssetLedger::new(&options.asset_root),
        };
        Self {
            options,
            ledger,
            caption_seq: 1,
            generated_at: meta
                .generated_at
                .unwrap_or_else(|| Local::now().naive_local()),
        }
    }

    pub(crate) fn options(&self) -> &AssemblyOptions {
        self.options
    }

    /// Generation date, rendered the way headers and footers show it.
    pub(crate) fn generated_date(&self) -> String {
        self.generated_at.format("%d/%m/%Y").to_string()
    }

    /// Current caption number; increments for the next caller.
    pub(crate) fn next_caption(&mut self) -> u32 {
        let n = self.caption_seq;
        self.caption_seq += 1;
        n
    }

    /// How many captioned images were emitted so far.
    pub(crate) fn images_emitted(&self) -> u32 {
        self.caption_seq - 1
    }

    /// Resolve an asset path against the configured root.
    pub(crate) fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.options.asset_root.join(path)
        }
    }

    /// Read and decode one asset.
    ///
    /// A file that cannot be read at all is skipped with a warning (`None`);
    /// a file that reads but will not decode comes back as the placeholder.
    /// The distinction is deliberate: absent data is dropped, damaged data
    /// is still represented on the page.
    pub(crate) fn load_asset(&self, path: &Path) -> Option<DecodedImage> {
        let full = self.resolve(path);
        let blob = match fs::read(&full) {
            Ok(blob) => blob,
            Err(e) => {
                log::warn!("asset unavailable, skipping: {} ({e})", full.display());
                return None;
            }
        };
        Some(recovery::decode(&blob, &self.options.recovery))
    }

    /// Resample `decoded` to its display size and materialize the transient
    /// copy, choosing the transient prefix from provenance.
    pub(crate) fn display_content(
        &mut self,
        decoded: DecodedImage,
        display: LayoutBox,
    ) -> Result<ImageContent> {
        let prefix = match decoded.provenance() {
            Provenance::Original => "temp",
            Provenance::Reconstructed | Provenance::Placeholder => "firma",
        };
        self.display_content_as(decoded, display, prefix)
    }

    /// Like [`Self::display_content`] with an explicit transient prefix
    /// (collage display copies keep the `collage` prefix).
    pub(crate) fn display_content_as(
        &mut self,
        decoded: DecodedImage,
        display: LayoutBox,
        prefix: &str,
    ) -> Result<ImageContent> {
        let (px_w, px_h) = display.px_dims();
        let provenance = decoded.provenance();
        let pixels = if (px_w, px_h) == decoded.dimensions() {
            decoded.into_pixels()
        } else {
            imageops::resize(decoded.pixels(), px_w, px_h, FilterType::Lanczos3)
        };
        self.ledger.materialize_png(&pixels, prefix)?;
        Ok(ImageContent {
            pixels: DecodedImage::new(pixels, provenance),
            display: LayoutBox::new(px_w as f32, px_h as f32),
        })
    }

    /// Compose a collage from decoded members via the run ledger.
    pub(crate) fn compose_collage(&mut self, members: &[DecodedImage]) -> Result<RgbImage> {
        collage::compose(members, self.options.collage_size_px, &mut self.ledger)
    }

    /// Load and fit the header logo, if the request names one.
    ///
    /// Unlike record assets, an unusable logo never becomes a placeholder;
    /// the header simply renders without one.
    pub(crate) fn header_logo(
        &self,
        meta: &ReportMeta,
        max_w: f32,
        max_h: f32,
    ) -> Option<ImageContent> {
        let path = meta.logo.as_deref()?;
        let decoded = self.load_asset(path)?;
        if decoded.provenance() == Provenance::Placeholder {
            log::warn!("logo did not decode, omitting it from the header");
            return None;
        }
        let display = fit_within(decoded.width(), decoded.height(), max_w, max_h);
        Some(ImageContent {
            pixels: decoded,
            display,
        })
    }

    /// Remove every transient file created during this run.
    pub(crate) fn release(&mut self) {
        self.ledger.release_all();
    }

    #[cfg(test)]
    pub(crate) fn ledger(&self) -> &TempAssetLedger {
        &self.ledger
    }
}

/// `value`, or `fallback` when it is blank.
pub(crate) fn or_fallback<'s>(value: &'s str, fallback: &'s str) -> &'s str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Caption text for an asset: the provided caption, or the file stem
/// prettified (underscores to spaces, title case) when none was given.
pub(crate) fn caption_or_stem(caption: &str, path: &Path) -> String {
    let trimmed = caption.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("imagen");
    prettify_stem(stem)
}

fn prettify_stem(stem: &str) -> String {
    stem.replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "Fecha Inicio" value with time, or the no-date fallback.
pub(crate) fn started_at_full(record: &RecordView) -> String {
    record.started_at.map_or_else(
        || "Sin fecha".to_string(),
        |ts| ts.format("%d/%m/%Y %H:%M").to_string(),
    )
}

/// Date-only form of the start timestamp.
pub(crate) fn started_at_date(record: &RecordView) -> String {
    record.started_at.map_or_else(
        || "Sin fecha".to_string(),
        |ts| ts.format("%d/%m/%Y").to_string(),
    )
}

/// Partition records by state label, keeping first-occurrence group order
/// and input order within each group.
pub(crate) fn group_by_state(records: &[RecordView]) -> Vec<(&str, Vec<&RecordView>)> {
    let mut groups: Vec<(&str, Vec<&RecordView>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(state, _)| *state == record.state) {
            Some((_, members)) => members.push(record),
            None => groups.push((record.state.as_str(), vec![record])),
        }
    }
    groups
}

/// Every image path of a record as a flat `(path, caption)` list.
///
/// The grouped and one-per-page variants render collage members as plain
/// images, so collage refs flatten here; member captions fall back to their
/// file names since the collage caption belongs to the composite.
pub(crate) fn flattened_assets(record: &RecordView) -> Vec<(&Path, &str)> {
    let mut out = Vec::new();
    for asset in &record.assets {
        match asset {
            informe_core::AssetRef::Individual { path, caption } => {
                out.push((path.as_path(), caption.as_str()));
            }
            informe_core::AssetRef::Collage { members, .. } => {
                out.extend(members.iter().map(|m| (m.as_path(), "")));
            }
        }
    }
    out
}
