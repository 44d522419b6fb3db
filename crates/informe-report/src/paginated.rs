//! One-image-per-page report.
//!
//! Same state grouping as the grouped variant, but each image is pushed into
//! its own page region by a large leading spacer and followed by a compact
//! metadata echo, so a printed page reads as one exhibit. Captions count
//! "Imagen N".

use informe_assets::sizing::fit_within;
use informe_core::{FlowBlock, OutputDocument, RecordView, ReportRequest, Result};

use crate::context::{
    caption_or_stem, flattened_assets, group_by_state, or_fallback, started_at_date,
    started_at_full, RunContext, PLATFORM_NAME, REPORT_TITLE,
};

pub(crate) const MARGIN_POINTS: f32 = 40.0;

const LOGO_MAX: (f32, f32) = (120.0, 60.0);
const IMAGE_CAP: (f32, f32) = (600.0, 700.0);
/// Gap that pushes the next image onto a fresh page region.
const PAGE_PUSH: f32 = 50.0;

pub(crate) fn emit(request: &ReportRequest, ctx: &mut RunContext<'_>) -> Result<OutputDocument> {
    let mut doc = OutputDocument::new();
    let meta = &request.meta;
    let version = or_fallback(&meta.version, "1.0").to_string();

    doc.push(FlowBlock::Header {
        logo: ctx.header_logo(meta, LOGO_MAX.0, LOGO_MAX.1),
        title: format!("{REPORT_TITLE}\n{}", PLATFORM_NAME.to_uppercase()),
        aside: format!("Versión {version}\nFecha: {}", ctx.generated_date()),
    });
    doc.push(FlowBlock::Spacer(40.0));

    for (state, records) in group_by_state(&request.records) {
        doc.push(FlowBlock::SectionHeader(format!(
            "ESTADO: {}",
            state.to_uppercase()
        )));
        for (i, record) in records.iter().enumerate() {
            push_record_fields(&mut doc, record, i + 1);
            push_record_images(&mut doc, ctx, record)?;
            doc.push(FlowBlock::Spacer(30.0));
        }
        doc.push(FlowBlock::Spacer(40.0));
    }

    doc.push(FlowBlock::Footer(format!(
        "Informe generado automáticamente por la {PLATFORM_NAME}\n\
         Versión {version}\n\
         Fecha de generación: {} | Total de imágenes: {}",
        ctx.generated_date(),
        ctx.images_emitted()
    )));
    Ok(doc)
}

/// Record block: the title folds into a leading "Incidencia {i}" field
/// instead of a subsection banner.
fn push_record_fields(doc: &mut OutputDocument, record: &RecordView, number: usize) {
    let fields = [
        (format!("Incidencia {number}"), record.title.clone()),
        ("Índice".to_string(), record.index.to_string()),
        (
            "Cliente".to_string(),
            or_fallback(&record.client, "N/A").to_string(),
        ),
        (
            "Sede".to_string(),
            or_fallback(&record.site, "N/A").to_string(),
        ),
        ("Estado".to_string(), record.state.clone()),
        ("Fecha Inicio".to_string(), started_at_full(record)),
        (
            "Técnico Asignado".to_string(),
            or_fallback(&record.technician, "Sin asignar").to_string(),
        ),
        ("Descripción".to_string(), record.description.clone()),
    ];
    for (label, value) in fields {
        doc.push(FlowBlock::Field { label, value });
    }
}

fn push_record_images(
    doc: &mut OutputDocument,
    ctx: &mut RunContext<'_>,
    record: &RecordView,
) -> Result<()> {
    for (path, caption) in flattened_assets(record) {
        let Some(decoded) = ctx.load_asset(path) else {
            continue;
        };
        let display = fit_within(decoded.width(), decoded.height(), IMAGE_CAP.0, IMAGE_CAP.1);
        let content = ctx.display_content(decoded, display)?;

        doc.push(FlowBlock::Spacer(PAGE_PUSH));
        let n = ctx.next_caption();
        doc.push(FlowBlock::Caption(format!(
            "Imagen {n}. {}",
            caption_or_stem(caption, path)
        )));
        doc.push(FlowBlock::Image(content));
        doc.push(FlowBlock::Spacer(30.0));

        // Metadata echo under each exhibit.
        doc.push(FlowBlock::Field {
            label: "Incidencia".to_string(),
            value: record.title.clone(),
        });
        doc.push(FlowBlock::Field {
            label: "Cliente".to_string(),
            value: or_fallback(&record.client, "N/A").to_string(),
        });
        doc.push(FlowBlock::Field {
            label: "Fecha".to_string(),
            value: started_at_date(record),
        });
    }
    Ok(())
}
