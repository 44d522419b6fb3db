//! Document assembly for activity reports.
//!
//! Takes a [`informe_core::ReportRequest`] and produces the ordered page
//! flow of one of three layouts ([`informe_core::ReportVariant`]):
//! grouped-by-state, one image per page, or structured narrative. Asset
//! decoding, sizing, collage composition and transient-file bookkeeping are
//! delegated to `informe-assets`; PDF byte generation to `informe-pdf`.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use informe_core::{ReportRequest, ReportVariant};
//! use informe_report::{assemble_to_pdf, AssemblyOptions};
//!
//! let request = ReportRequest::from_json_file("request.json")?;
//! let options = AssemblyOptions::new("/srv/incidencias/assets");
//! let pdf = assemble_to_pdf(&request, ReportVariant::StructuredNarrative, &options)?;
//! std::fs::write("informe.pdf", pdf)?;
//! ```
//!
//! Assembly never aborts on a bad photo or signature: unreadable files are
//! skipped, undecodable ones degrade to a placeholder card. Only I/O
//! failures writing derived files propagate, and even then every transient
//! file of the run is cleaned up first.

mod assembler;
mod context;
mod grouped;
mod narrative;
mod options;
mod paginated;

pub use assembler::{assemble, assemble_to_pdf, margin_points};
pub use options::AssemblyOptions;
