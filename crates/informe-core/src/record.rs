//! Read-only record projections handed in by the surrounding platform.
//!
//! The web/persistence layer owns the real incident entities; the engine only
//! sees this flattened view, delivered as JSON. Asset partitioning into
//! individual images and collage groups happens on that side too — here it is
//! plain input.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference to one renderable asset of a record.
///
/// Paths are relative to the configured asset root. The `caption` is the
/// human title assigned when the report was composed; when empty, variants
/// fall back to a prettified form of the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetRef {
    /// A single photograph or signature rendered on its own.
    Individual {
        /// Storage path relative to the asset root.
        path: PathBuf,
        /// Caption text, may be empty.
        #[serde(default)]
        caption: String,
    },
    /// A group of images composed into one square grid collage.
    Collage {
        /// Caption text for the composite, may be empty.
        #[serde(default)]
        caption: String,
        /// Member storage paths relative to the asset root. Members missing
        /// on disk are skipped; an all-missing group is dropped entirely.
        members: Vec<PathBuf>,
    },
}

impl AssetRef {
    /// The caption text as provided, without any fallback applied.
    #[must_use]
    pub fn caption(&self) -> &str {
        match self {
            Self::Individual { caption, .. } | Self::Collage { caption, .. } => caption,
        }
    }
}

/// Read-only projection of one incident record, as rendered into reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView {
    /// Stable numeric identifier ("Índice" in the rendered output).
    pub index: u64,
    /// Record title.
    pub title: String,
    /// Free-text body ("Descripción").
    #[serde(default)]
    pub description: String,
    /// State label, e.g. "Abierta", "En proceso", "Cerrada". Grouping keys
    /// off this string verbatim.
    pub state: String,
    /// When work on the record started.
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    /// Client name ("Cliente").
    #[serde(default)]
    pub client: String,
    /// Site name ("Sede").
    #[serde(default)]
    pub site: String,
    /// Assigned technician ("Técnico Asignado").
    #[serde(default)]
    pub technician: String,
    /// Ordered attached assets.
    #[serde(default)]
    pub assets: Vec<AssetRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_ref_individual_from_json() {
        let json = r#"{ "kind": "individual", "path": "foto_equipo.png", "caption": "Cuadro de control" }"#;
        let asset: AssetRef = serde_json::from_str(json).unwrap();
        match asset {
            AssetRef::Individual { path, caption } => {
                assert_eq!(path, PathBuf::from("foto_equipo.png"));
                assert_eq!(caption, "Cuadro de control");
            }
            AssetRef::Collage { .. } => panic!("Expected individual asset"),
        }
    }

    #[test]
    fn test_asset_ref_collage_from_json() {
        let json = r#"{ "kind": "collage", "caption": "Trabajos", "members": ["a.png", "b.jpg"] }"#;
        let asset: AssetRef = serde_json::from_str(json).unwrap();
        match asset {
            AssetRef::Collage { caption, members } => {
                assert_eq!(caption, "Trabajos");
                assert_eq!(members.len(), 2);
            }
            AssetRef::Individual { .. } => panic!("Expected collage asset"),
        }
    }

    #[test]
    fn test_asset_ref_caption_defaults_empty() {
        let json = r#"{ "kind": "individual", "path": "firma.png" }"#;
        let asset: AssetRef = serde_json::from_str(json).unwrap();
        assert_eq!(asset.caption(), "");
    }

    #[test]
    fn test_record_view_from_json_minimal() {
        let json = r#"{
            "index": 42,
            "title": "Fallo de climatización",
            "state": "Abierta"
        }"#;
        let record: RecordView = serde_json::from_str(json).unwrap();
        assert_eq!(record.index, 42);
        assert_eq!(record.title, "Fallo de climatización");
        assert_eq!(record.state, "Abierta");
        assert!(record.description.is_empty());
        assert!(record.started_at.is_none());
        assert!(record.assets.is_empty());
    }

    #[test]
    fn test_record_view_timestamp_parses() {
        let json = r#"{
            "index": 7,
            "title": "Sensor averiado",
            "state": "Cerrada",
            "started_at": "2025-03-14T09:30:00"
        }"#;
        let record: RecordView = serde_json::from_str(json).unwrap();
        let ts = record.started_at.expect("timestamp should parse");
        assert_eq!(ts.format("%d/%m/%Y %H:%M").to_string(), "14/03/2025 09:30");
    }

    #[test]
    fn test_record_view_round_trip() {
        let record = RecordView {
            index: 3,
            title: "Revisión".to_string(),
            description: "Cambio de filtro".to_string(),
            state: "En proceso".to_string(),
            started_at: None,
            client: "ACME".to_string(),
            site: "Sede Norte".to_string(),
            technician: "L. Ortiz".to_string(),
            assets: vec![AssetRef::Individual {
                path: PathBuf::from("antes.jpg"),
                caption: String::new(),
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: RecordView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
