//! # Informe Core - Report Model Library
//!
//! Shared types for the informe_rs report engine: the request-side data model
//! the incident platform hands over, the page-flow block model the assembler
//! emits, and the error taxonomy every crate in the workspace uses.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: the assembler lives in the informe-report crate
//! use informe_core::{ReportRequest, ReportVariant};
//! use informe_report::{assemble_to_pdf, AssemblyOptions};
//!
//! fn main() -> informe_core::Result<()> {
//!     let request = ReportRequest::from_json_file("request.json")?;
//!     let options = AssemblyOptions::new("uploads");
//!
//!     let pdf = assemble_to_pdf(&request, ReportVariant::StructuredNarrative, &options)?;
//!     std::fs::write("informe.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`report`] - `ReportRequest` / `ReportMeta` input model (JSON interchange)
//! - [`record`] - Per-record projections and asset references
//! - [`variant`] - The three normative document variants
//! - [`flow`] - Page-flow blocks produced by the assembler
//! - [`image`] - Decoded image, provenance and layout-box types
//! - [`error`] - Error types and the crate-wide `Result` alias
//!
//! The request-side model is fully serde-serializable; flow blocks and
//! decoded images are in-memory pipeline values and deliberately are not
//! (pixel buffers do not belong in JSON).

pub mod error;
pub mod flow;
pub mod image;
pub mod record;
pub mod report;
pub mod variant;

// Re-exports for convenience
pub use error::*;
pub use flow::*;
pub use image::*;
pub use record::*;
pub use report::*;
pub use variant::*;
