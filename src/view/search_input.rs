//! Search input widget for rendering the search bar.

use super::styles::Palette;
use crate::state::SearchInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown when the box is empty and unfocused.
pub const SEARCH_PLACEHOLDER: &str = "Search characters by name... (press /)";

/// Search box widget.
///
/// Shows a block cursor while focused; otherwise the query as plain text,
/// or a placeholder when empty.
pub struct SearchBox<'a> {
    input: &'a SearchInput,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> SearchBox<'a> {
    /// Create new search box widget.
    pub fn new(input: &'a SearchInput, focused: bool, palette: &'a Palette) -> Self {
        Self {
            input,
            focused,
            palette,
        }
    }

    fn line(&self) -> Line<'static> {
        let query = &self.input.query;
        if !self.focused {
            return if query.is_empty() {
                Line::from(Span::styled(SEARCH_PLACEHOLDER, self.palette.muted))
            } else {
                Line::from(query.clone())
            };
        }

        // Split query into before/after cursor for rendering cursor
        let cursor = self.input.cursor;
        let before: String = query.chars().take(cursor).collect();
        let mut after = query.chars().skip(cursor);
        let cursor_char = after.next().map_or_else(|| " ".to_string(), String::from);
        let after_text: String = after.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char, self.palette.cursor),
            Span::raw(after_text),
        ])
    }
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL).title(" Search ");
        if self.focused {
            block = block.border_style(self.palette.focused_border);
        }
        Paragraph::new(self.line()).block(block).render(area, buf);
    }
}
