//! Flow-block dispatch onto the page writer.

use informe_core::{FlowBlock, OutputDocument, Result};

use crate::options::RenderOptions;
use crate::text::wrap;
use crate::writer::{Align, Font, PageWriter};

const TITLE_SIZE: f32 = 16.0;
const SUBTITLE_SIZE: f32 = 12.0;
const SECTION_SIZE: f32 = 13.0;
const SUBSECTION_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const ASIDE_SIZE: f32 = 9.0;
const CAPTION_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

/// Realize an assembled page flow as PDF bytes.
///
/// Blocks are consumed strictly in order; pagination is the only layout
/// decision taken here, everything else (display sizes, captions, grouping)
/// was already fixed by the assembler.
pub fn render(document: &OutputDocument, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new(options);
    for block in document.blocks() {
        push_block(&mut writer, block)?;
    }
    writer.finish()
}

fn push_block(writer: &mut PageWriter, block: &FlowBlock) -> Result<()> {
    match block {
        FlowBlock::Header { logo, title, aside } => {
            if let Some(logo) = logo {
                writer.image(logo)?;
                writer.spacer(6.0)?;
            }
            for (i, line) in title.lines().enumerate() {
                let size = if i == 0 { TITLE_SIZE } else { SUBTITLE_SIZE };
                writer.line(line, Font::Bold, size, Align::Center)?;
            }
            for line in aside.lines() {
                writer.line(line, Font::Regular, ASIDE_SIZE, Align::Right)?;
            }
        }
        FlowBlock::SectionHeader(text) => {
            writer.spacer(8.0)?;
            writer.line(text, Font::Bold, SECTION_SIZE, Align::Left)?;
            writer.spacer(4.0)?;
        }
        FlowBlock::Subsection(text) => {
            writer.spacer(4.0)?;
            writer.line(text, Font::Bold, SUBSECTION_SIZE, Align::Left)?;
        }
        FlowBlock::Paragraph(text) => {
            push_wrapped(writer, text, Font::Regular, BODY_SIZE)?;
        }
        FlowBlock::Field { label, value } => {
            push_field(writer, label, value)?;
        }
        FlowBlock::FieldRow(pairs) => {
            let row = pairs
                .iter()
                .map(|(label, value)| format!("{label}: {value}"))
                .collect::<Vec<_>>()
                .join(" | ");
            push_wrapped(writer, &row, Font::Regular, ASIDE_SIZE)?;
        }
        FlowBlock::Image(content) => {
            writer.image(content)?;
        }
        FlowBlock::Caption(text) => {
            for line in wrap(text, CAPTION_SIZE, writer.content_width()) {
                writer.line(&line, Font::Oblique, CAPTION_SIZE, Align::Center)?;
            }
        }
        FlowBlock::Spacer(gap) => {
            writer.spacer(*gap)?;
        }
        FlowBlock::Footer(text) => {
            writer.spacer(14.0)?;
            for line in text.lines() {
                writer.line(line, Font::Oblique, FOOTER_SIZE, Align::Center)?;
            }
        }
    }
    Ok(())
}

fn push_wrapped(writer: &mut PageWriter, text: &str, font: Font, size: f32) -> Result<()> {
    for line in wrap(text, size, writer.content_width()) {
        writer.line(&line, font, size, Align::Left)?;
    }
    Ok(())
}

/// "Label: value" line with the label in bold.
///
/// Continuation lines of a wrapped value render in the regular weight; when
/// even the label does not fit the line, the whole thing falls back to the
/// regular weight rather than splitting a styled segment.
fn push_field(writer: &mut PageWriter, label: &str, value: &str) -> Result<()> {
    let prefix = format!("{label}: ");
    let full = format!("{prefix}{value}");
    let mut first = true;
    for line in wrap(&full, BODY_SIZE, writer.content_width()) {
        match line.strip_prefix(prefix.as_str()) {
            Some(rest) if first => {
                writer.line_segments(
                    &[(Font::Bold, prefix.trim_end()), (Font::Regular, " "), (Font::Regular, rest)],
                    BODY_SIZE,
                    Align::Left,
                )?;
            }
            _ => writer.line(&line, Font::Regular, BODY_SIZE, Align::Left)?,
        }
        first = false;
    }
    Ok(())
}
