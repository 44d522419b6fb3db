//! Grouped-by-state professional report.
//!
//! Records are partitioned by their state label; each group opens with an
//! uppercased section banner and numbers its records from 1. Every attached
//! image is rendered inline ("Figura N"), several to a page.

use informe_assets::sizing::fit_within;
use informe_core::{FlowBlock, OutputDocument, RecordView, ReportRequest, Result};

use crate::context::{
    caption_or_stem, flattened_assets, group_by_state, or_fallback, started_at_full, RunContext,
    PLATFORM_NAME, REPORT_TITLE,
};

pub(crate) const MARGIN_POINTS: f32 = 50.0;

const LOGO_MAX: (f32, f32) = (100.0, 50.0);
const IMAGE_CAP: (f32, f32) = (500.0, 400.0);

pub(crate) fn emit(request: &ReportRequest, ctx: &mut RunContext<'_>) -> Result<OutputDocument> {
    let mut doc = OutputDocument::new();
    let meta = &request.meta;
    let version = or_fallback(&meta.version, "1.0").to_string();

    doc.push(FlowBlock::Header {
        logo: ctx.header_logo(meta, LOGO_MAX.0, LOGO_MAX.1),
        title: format!("{REPORT_TITLE}\n{}", PLATFORM_NAME.to_uppercase()),
        aside: format!("Versión {version}\nFecha: {}", ctx.generated_date()),
    });
    doc.push(FlowBlock::Spacer(30.0));

    for (state, records) in group_by_state(&request.records) {
        doc.push(FlowBlock::SectionHeader(format!(
            "ESTADO: {}",
            state.to_uppercase()
        )));
        for (i, record) in records.iter().enumerate() {
            doc.push(FlowBlock::Subsection(format!("{}. {}", i + 1, record.title)));
            push_record_fields(&mut doc, record);
            push_record_images(&mut doc, ctx, record)?;
            doc.push(FlowBlock::Spacer(20.0));
        }
        doc.push(FlowBlock::Spacer(30.0));
    }

    doc.push(FlowBlock::Footer(format!(
        "Informe generado automáticamente por la {PLATFORM_NAME}\n\
         Versión {version}\n\
         Fecha de generación: {}",
        ctx.generated_date()
    )));
    Ok(doc)
}

fn push_record_fields(doc: &mut OutputDocument, record: &RecordView) {
    let fields = [
        ("Índice", record.index.to_string()),
        ("Cliente", or_fallback(&record.client, "N/A").to_string()),
        ("Sede", or_fallback(&record.site, "N/A").to_string()),
        ("Estado", record.state.clone()),
        ("Fecha Inicio", started_at_full(record)),
        (
            "Técnico Asignado",
            or_fallback(&record.technician, "Sin asignar").to_string(),
        ),
        ("Descripción", record.description.clone()),
    ];
    for (label, value) in fields {
        doc.push(FlowBlock::Field {
            label: label.to_string(),
            value,
        });
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
        doc.push(FlowBlock::Spacer(10.0));
        let n = ctx.next_caption();
        doc.push(FlowBlock::Caption(format!(
            "Figura {n}. {}",
            caption_or_stem(caption, path)
        )));
        doc.push(FlowBlock::Image(content));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AssemblyOptions;
    use chrono::NaiveDate;
    use informe_core::ReportMeta;

    fn record(index: u64, title: &str, state: &str) -> RecordView {
        RecordView {
            index,
            title: title.to_string(),
            description: "Trabajo realizado".to_string(),
            state: state.to_string(),
            started_at: NaiveDate::from_ymd_opt(2025, 3, 14)
                .and_then(|d| d.and_hms_opt(9, 30, 0)),
            client: "ACME".to_string(),
            site: String::new(),
            technician: String::new(),
            assets: Vec::new(),
        }
    }

    fn request() -> ReportRequest {
        ReportRequest {
            meta: ReportMeta {
                version: "2.0".to_string(),
                generated_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                    .and_then(|d| d.and_hms_opt(12, 0, 0)),
                ..ReportMeta::default()
            },
            records: vec![
                record(1, "Bomba averiada", "Abierta"),
                record(2, "Sensor de humo", "Cerrada"),
                record(3, "Filtro obstruido", "Abierta"),
            ],
        }
    }

    #[test]
    fn test_sections_follow_first_occurrence_order() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        let request = request();
        let mut ctx = RunContext::new(&options, &request.meta);
        let doc = emit(&request, &mut ctx).unwrap();

        let headers: Vec<&str> = doc.section_headers().collect();
        assert_eq!(headers, vec!["ESTADO: ABIERTA", "ESTADO: CERRADA"]);
    }

    #[test]
    fn test_subsection_numbering_restarts_per_group() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        let request = request();
        let mut ctx = RunContext::new(&options, &request.meta);
        let doc = emit(&request, &mut ctx).unwrap();

        let subsections: Vec<&str> = doc.subsections().collect();
        assert_eq!(
            subsections,
            vec![
                "1. Bomba averiada",
                "2. Filtro obstruido",
                "1. Sensor de humo"
            ]
        );
    }

    #[test]
    fn test_header_and_footer_carry_version_and_date() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        let request = request();
        let mut ctx = RunContext::new(&options, &request.meta);
        let doc = emit(&request, &mut ctx).unwrap();

        let aside = doc
            .blocks()
            .iter()
            .find_map(|b| match b {
                FlowBlock::Header { aside, .. } => Some(aside.as_str()),
                _ => None,
            })
            .unwrap();
        assert_eq!(aside, "Versión 2.0\nFecha: 01/06/2025");

        let footer = doc
            .blocks()
            .iter()
            .find_map(|b| match b {
                FlowBlock::Footer(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap();
        assert!(footer.contains("Versión 2.0"));
        assert!(footer.contains("Fecha de generación: 01/06/2025"));
    }

    #[test]
    fn test_field_fallbacks_applied() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        let request = request();
        let mut ctx = RunContext::new(&options, &request.meta);
        let doc = emit(&request, &mut ctx).unwrap();

        let fields: Vec<(&str, &str)> = doc
            .blocks()
            .iter()
            .filter_map(|b| match b {
                FlowBlock::Field { label, value } => Some((label.as_str(), value.as_str())),
                _ => None,
            })
            .collect();
        assert!(fields.contains(&("Sede", "N/A")));
        assert!(fields.contains(&("Técnico Asignado", "Sin asignar")));
        assert!(fields.contains(&("Fecha Inicio", "14/03/2025 09:30")));
    }

    #[test]
    fn test_no_images_means_no_captions() {
        let options = AssemblyOptions::new("/tmp").with_run_stamp("20250101_120000");
        let request = request();
        let mut ctx = RunContext::new(&options, &request.meta);
        let doc = emit(&request, &mut ctx).unwrap();

        assert_eq!(doc.captions().count(), 0);
        assert_eq!(doc.images().count(), 0);
        assert_eq!(ctx.images_emitted(), 0);
    }
}
