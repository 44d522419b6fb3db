//! Variant dispatch and run lifecycle.

use informe_core::{OutputDocument, ReportRequest, ReportVariant, Result};

use crate::context::RunContext;
use crate::options::AssemblyOptions;
use crate::{grouped, narrative, paginated};

/// Assemble `request` into an ordered page flow.
///
/// Every transient file created during the run is removed before this
/// function returns, on the success path and the error path alike; an error
/// therefore never leaves partial derived files in the asset directory.
pub fn assemble(
    request: &ReportRequest,
    variant: ReportVariant,
    options: &AssemblyOptions,
) -> Result<OutputDocument> {
    log::info!(
        "assembling {variant} report: {} records, {} asset refs",
        request.records.len(),
        request.asset_count()
    );

    let mut ctx = RunContext::new(options, &request.meta);
    let result = match variant {
        ReportVariant::GroupedByState => grouped::emit(request, &mut ctx),
        ReportVariant::OnePerPage => paginated::emit(request, &mut ctx),
        ReportVariant::StructuredNarrative => narrative::emit(request, &mut ctx),
    };
    ctx.release();

    match &result {
        Ok(doc) => log::debug!(
            "assembled {} flow blocks, {} captioned images",
            doc.len(),
            ctx.images_emitted()
        ),
        Err(e) => log::warn!("assembly failed after transient cleanup: {e}"),
    }
    result
}

/// Page margin used when rendering a variant, in points.
#[must_use]
pub fn margin_points(variant: ReportVariant) -> f32 {
    match variant {
        ReportVariant::GroupedByState => grouped::MARGIN_POINTS,
        ReportVariant::OnePerPage => paginated::MARGIN_POINTS,
        ReportVariant::StructuredNarrative => narrative::MARGIN_POINTS,
    }
}

/// Assemble `request` and render it straight to PDF bytes.
pub fn assemble_to_pdf(
    request: &ReportRequest,
    variant: ReportVariant,
    options: &AssemblyOptions,
) -> Result<Vec<u8>> {
    let document = assemble(request, variant, options)?;
    let render = informe_pdf::RenderOptions::new().with_margin(margin_points(variant));
    informe_pdf::render(&document, &render)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_per_variant() {
        assert_eq!(margin_points(ReportVariant::GroupedByState), 50.0);
        assert_eq!(margin_points(ReportVariant::OnePerPage), 40.0);
        assert_eq!(margin_points(ReportVariant::StructuredNarrative), 40.0);
    }

    #[test]
    fn test_assemble_empty_request_yields_header_and_footer() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        for variant in [
            ReportVariant::GroupedByState,
            ReportVariant::OnePerPage,
            ReportVariant::StructuredNarrative,
        ] {
            let doc = assemble(&ReportRequest::default(), variant, &options).unwrap();
            assert!(!doc.is_empty(), "{variant} should emit header and footer");
            assert!(
                matches!(doc.blocks()[0], informe_core::FlowBlock::Header { .. }),
                "{variant} starts with a header"
            );
            assert!(
                matches!(doc.blocks().last(), Some(informe_core::FlowBlock::Footer(_))),
                "{variant} ends with a footer"
            );
        }
    }
}
