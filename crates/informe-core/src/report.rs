//! Report request types: everything one assembly run needs as input.

use crate::error::Result;
use crate::record::RecordView;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Report-level metadata shown in headers, the client block and footers.
///
/// Field names follow the rendered Spanish labels: `contact` is "Atención",
/// `contact_role` is "Cargo", `scope` is "Alcance del Proyecto".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Client name ("Cliente").
    #[serde(default)]
    pub client: String,
    /// Contact person ("Atención").
    #[serde(default)]
    pub contact: String,
    /// Contact role ("Cargo").
    #[serde(default)]
    pub contact_role: String,
    /// Short project scope description ("Alcance del Proyecto").
    #[serde(default)]
    pub scope: String,
    /// Free-text introduction; its section is omitted when empty.
    #[serde(default)]
    pub introduction: String,
    /// Free-text conclusions; its section is omitted when empty.
    #[serde(default)]
    pub conclusions: String,
    /// Version label shown as "Versión {..}" in the header.
    #[serde(default)]
    pub version: String,
    /// Generation timestamp; the assembler fills in the current time when
    /// absent.
    #[serde(default)]
    pub generated_at: Option<NaiveDateTime>,
    /// Optional logo asset, relative to the asset root. Missing or
    /// undecodable logos degrade to a header without one.
    #[serde(default)]
    pub logo: Option<PathBuf>,
}

/// Complete input of one assembly run: metadata plus the ordered records.
///
/// Immutable for the duration of the run. This is the JSON interchange type
/// the web layer and the CLI hand to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Report-level metadata.
    #[serde(default)]
    pub meta: ReportMeta,
    /// Records to report on, in input order.
    pub records: Vec<RecordView>,
}

impl ReportRequest {
    /// Parse a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a request from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Total number of asset references across all records, collage members
    /// counted as one asset each.
    #[must_use]
    pub fn asset_count(&self) -> usize {
        self.records.iter().map(|r| r.assets.len()).sum()
    }
}
