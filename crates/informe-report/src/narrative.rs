//! Structured narrative report.
//!
//! No state grouping: an introduction, one numbered activity per record with
//! its individual images first and its collages after, then conclusions.
//! Images use the aspect-banded physical fit and captions sit below them,
//! numbered continuously across individuals and collages.

use informe_assets::sizing::fit;
use informe_core::{
    AssetRef, DecodedImage, FlowBlock, OutputDocument, Provenance, ReportRequest, Result,
};
use std::path::{Path, PathBuf};

use crate::context::{caption_or_stem, or_fallback, RunContext, PLATFORM_NAME, REPORT_TITLE};

pub(crate) const MARGIN_POINTS: f32 = 40.0;

const LOGO_MAX: (f32, f32) = (80.0, 40.0);

pub(crate) fn emit(request: &ReportRequest, ctx: &mut RunContext<'_>) -> Result<OutputDocument> {
    let mut doc = OutputDocument::new();
    let meta = &request.meta;
    let version = or_fallback(&meta.version, "1").to_string();

    doc.push(FlowBlock::Header {
        logo: ctx.header_logo(meta, LOGO_MAX.0, LOGO_MAX.1),
        title: REPORT_TITLE.to_string(),
        aside: format!("Versión {version}"),
    });
    doc.push(FlowBlock::Spacer(20.0));

    let client_fields = [
        ("Cliente", or_fallback(&meta.client, "N/A").to_string()),
        ("Atención", or_fallback(&meta.contact, "N/A").to_string()),
        ("Cargo", or_fallback(&meta.contact_role, "N/A").to_string()),
        (
            "Alcance del Proyecto",
            or_fallback(&meta.scope, "N/A").to_string(),
        ),
        ("Fecha", ctx.generated_date()),
    ];
    for (label, value) in client_fields {
        doc.push(FlowBlock::Field {
            label: label.to_string(),
            value,
        });
    }
    doc.push(FlowBlock::Spacer(20.0));

    if !meta.introduction.trim().is_empty() {
        doc.push(FlowBlock::SectionHeader("Introducción".to_string()));
        doc.push(FlowBlock::Paragraph(meta.introduction.clone()));
        doc.push(FlowBlock::Spacer(20.0));
    }

    doc.push(FlowBlock::SectionHeader(
        "1. Actividades Realizadas".to_string(),
    ));

    for (i, record) in request.records.iter().enumerate() {
        doc.push(FlowBlock::Subsection(format!("{}. {}", i + 1, record.title)));
        doc.push(FlowBlock::FieldRow(vec![
            ("Índice".to_string(), record.index.to_string()),
            (
                "Cliente".to_string(),
                or_fallback(&record.client, "N/A").to_string(),
            ),
            (
                "Sede".to_string(),
                or_fallback(&record.site, "N/A").to_string(),
            ),
        ]));
        doc.push(FlowBlock::Field {
            label: "Descripción".to_string(),
            value: record.description.clone(),
        });
        doc.push(FlowBlock::Spacer(10.0));

        // Individuals render before collages, caption numbering shared.
        for asset in &record.assets {
            if let AssetRef::Individual { path, caption } = asset {
                push_individual(&mut doc, ctx, path, caption)?;
            }
        }
        for asset in &record.assets {
            if let AssetRef::Collage { caption, members } = asset {
                push_collage(&mut doc, ctx, caption, members)?;
            }
        }

        doc.push(FlowBlock::Spacer(20.0));
    }

    if !meta.conclusions.trim().is_empty() {
        doc.push(FlowBlock::SectionHeader("Conclusiones".to_string()));
        doc.push(FlowBlock::Paragraph(meta.conclusions.clone()));
    }

    doc.push(FlowBlock::Spacer(50.0));
    doc.push(FlowBlock::Footer(format!(
        "Informe generado automáticamente - {PLATFORM_NAME} | Total de imágenes: {}",
        ctx.images_emitted()
    )));
    Ok(doc)
}

fn push_individual(
    doc: &mut OutputDocument,
    ctx: &mut RunContext<'_>,
    path: &Path,
    caption: &str,
) -> Result<()> {
    let Some(decoded) = ctx.load_asset(path) else {
        return Ok(());
    };
    let display = fit(decoded.width(), decoded.height(), &ctx.options().sizing);
    let content = ctx.display_content(decoded, display)?;

    doc.push(FlowBlock::Spacer(15.0));
    doc.push(FlowBlock::Image(content));
    let n = ctx.next_caption();
    doc.push(FlowBlock::Caption(format!(
        "Imagen {n}. {}",
        caption_or_stem(caption, path)
    )));
    Ok(())
}

fn push_collage(
    doc: &mut OutputDocument,
    ctx: &mut RunContext<'_>,
    caption: &str,
    members: &[PathBuf],
) -> Result<()> {
    let decoded_members: Vec<DecodedImage> = members
        .iter()
        .filter_map(|member| ctx.load_asset(member))
        .collect();
    if decoded_members.is_empty() {
        log::debug!("collage has no resolvable members, skipping");
        return Ok(());
    }

    let composite = DecodedImage::new(ctx.compose_collage(&decoded_members)?, Provenance::Original);
    let display = fit(composite.width(), composite.height(), &ctx.options().sizing);
    let content = ctx.display_content_as(composite, display, "collage")?;

    doc.push(FlowBlock::Spacer(15.0));
    doc.push(FlowBlock::Image(content));
    let n = ctx.next_caption();
    let text = or_fallback(caption, "Collage");
    doc.push(FlowBlock::Caption(format!("Imagen {n}. {text}")));
    Ok(())
}
