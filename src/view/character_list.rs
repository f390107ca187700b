//! Character list pane: results, empty states, error panel and load-more footer.

use super::constants::ERROR_BANNER_HEIGHT;
use super::helpers::empty_line;
use super::styles::Palette;
use crate::model::FetchError;
use crate::state::ListController;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Message shown when a finished fetch produced no rows.
pub fn empty_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        "No characters available."
    } else {
        "No characters found matching your search."
    }
}

/// Block title summarizing what is loaded.
pub fn list_title(list: &ListController) -> String {
    let count = list.characters().len();
    let query = list.query().trim();
    if !query.is_empty() {
        let plural = if count == 1 { "" } else { "s" };
        return format!(" Found {count} character{plural} matching \"{query}\" ");
    }
    match list.total_records() {
        Some(total) => format!(" Characters ({count} of {total}) "),
        None => format!(" Characters ({count}) "),
    }
}

/// Trailing row under the results, if any.
pub fn footer_text(list: &ListController) -> Option<&'static str> {
    if list.is_loading() {
        Some("Loading...")
    } else if list.has_more() {
        Some("▼ Load more characters (n)")
    } else {
        None
    }
}

/// Lines of the error panel.
pub fn error_lines(error: &FetchError, palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("Something went wrong", palette.error)),
        Line::from(error.to_string()),
        empty_line(),
        Line::from(vec![
            Span::styled("Press ", palette.muted),
            Span::styled("r", palette.key),
            Span::styled(" to try again", palette.muted),
        ]),
    ]
}

/// Render the list pane into `area`.
pub fn render_character_list(
    frame: &mut Frame,
    area: Rect,
    list: &ListController,
    selected: Option<usize>,
    palette: &Palette,
) {
    let characters = list.characters();

    if characters.is_empty() {
        let block = Block::default().borders(Borders::ALL).title(list_title(list));
        let lines = if let Some(error) = list.error() {
            error_lines(error, palette)
        } else if list.is_loading() {
            vec![Line::from(Span::styled("Loading characters...", palette.muted))]
        } else {
            vec![Line::from(Span::styled(
                empty_message(list.query()),
                palette.muted,
            ))]
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    // Errors on later pages keep the accumulated rows visible under a banner.
    let list_area = match list.error() {
        Some(error) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(ERROR_BANNER_HEIGHT), Constraint::Min(0)])
                .split(area);
            let banner = Paragraph::new(error_lines(error, palette))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(banner, chunks[0]);
            chunks[1]
        }
        None => area,
    };

    let mut items: Vec<ListItem> = characters
        .iter()
        .map(|c| ListItem::new(Line::from(format!(" {}", c.name))))
        .collect();
    if let Some(footer) = footer_text(list) {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {footer}"),
            palette.muted,
        ))));
    }

    let widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(list_title(list)))
        .highlight_style(palette.selected)
        .highlight_symbol("▶");

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(widget, list_area, &mut state);
}
