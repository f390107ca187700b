//! Small line builders shared by widgets.

use super::styles::Palette;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// A blank line.
pub fn empty_line() -> Line<'static> {
    Line::from("")
}

/// `  Label:  value` with the label column padded to `width` display cells.
pub fn key_value_line(label: &str, value: String, width: usize, palette: &Palette) -> Line<'static> {
    let label = format!("{label}:");
    let padding = width.saturating_sub(label.width());
    Line::from(vec![
        Span::styled(format!("  {label}{} ", " ".repeat(padding)), palette.label),
        Span::styled(value, palette.value),
    ])
}

/// `key description` pair as used in the status bar and help overlay.
pub fn hint(key: &'static str, description: &'static str, palette: &Palette) -> Vec<Span<'static>> {
    vec![
        Span::styled(key, palette.key),
        Span::styled(format!(" {description}  "), palette.muted),
    ]
}
