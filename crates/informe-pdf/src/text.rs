//! Text measurement, wrapping and WinAnsi encoding.
//!
//! The standard fonts are not embedded, so widths are estimated with the
//! usual 0.6-em average-glyph heuristic rather than read from metrics
//! tables. That is plenty for wrapping body text and centering headings;
//! nothing downstream depends on exact line widths.

/// Average glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.6;

/// Estimated width of `text` at `size` points.
#[must_use]
pub(crate) fn estimate_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH_EM
}

/// Greedy word wrap of `text` into lines no wider than `max_width` points.
///
/// A word longer than the whole line is emitted on its own rather than
/// split; explicit newlines in the input always break.
pub(crate) fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if estimate_width(&candidate, size) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Encode `text` as WinAnsi (CP1252) bytes for a literal PDF string.
///
/// The Helvetica resources declare `/Encoding /WinAnsiEncoding`, so Spanish
/// accented characters map to their single-byte codes. Characters outside
/// the code page degrade to `?` instead of corrupting the stream.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0000}'..='\u{007e}' => c as u8,
            '\u{00a0}'..='\u{00ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}
