//! PDF realization of assembled page flows.
//!
//! Takes the ordered [`informe_core::OutputDocument`] block sequence and
//! turns it into A4 PDF bytes with a top-down cursor: text is placed with
//! the standard Helvetica family, images are embedded as DCT-encoded
//! XObjects, and a page break happens whenever the next block would not fit
//! above the bottom margin.
//!
//! The crate knows nothing about records, captions or variants; the flow
//! order it receives is already final. Only physical realization happens
//! here, which is why its single entry point is bytes-in-bytes-out:
//!
//! ```rust
//! use informe_core::{FlowBlock, OutputDocument};
//! use informe_pdf::{render, RenderOptions};
//!
//! let mut doc = OutputDocument::new();
//! doc.push(FlowBlock::SectionHeader("Conclusiones".to_string()));
//! doc.push(FlowBlock::Paragraph("Sistema operativo.".to_string()));
//!
//! let pdf = render(&doc, &RenderOptions::new()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod options;
mod render;
mod text;
mod writer;

pub use options::RenderOptions;
pub use render::render;
pub use writer::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
