//! Report variant selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The normative document layouts the assembler can produce.
///
/// All variants consume the same [`crate::ReportRequest`]; they differ in
/// grouping, pagination and caption wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    /// Records grouped by state label, several images per page, captions
    /// read "Figura N".
    GroupedByState,
    /// Same grouping, but every image is pushed onto its own page region and
    /// followed by a metadata summary; captions read "Imagen N".
    OnePerPage,
    /// Ungrouped narrative: introduction, numbered activities with individual
    /// and collage images, conclusions; captions read "Imagen N".
    StructuredNarrative,
}

impl ReportVariant {
    /// Stable lowercase name, matching the CLI argument spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GroupedByState => "grouped",
            Self::OnePerPage => "one-per-page",
            Self::StructuredNarrative => "narrative",
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grouped" | "grouped-by-state" | "profesional" => Ok(Self::GroupedByState),
            "one-per-page" | "multipagina" => Ok(Self::OnePerPage),
            "narrative" | "structured" | "actividades" => Ok(Self::StructuredNarrative),
            other => Err(format!("Unknown report variant: {other}")),
        }
    }
}
