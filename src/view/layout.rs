//! Screen layout rendering.
//!
//! Header, search box, body (list or details) and status bar, top to bottom.

use super::character_details::render_character_details;
use super::character_list::render_character_list;
use super::constants::{
    HEADER_HEIGHT, PANE_BORDER_LINES, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT,
};
use super::help::render_help_overlay;
use super::helpers::hint;
use super::search_input::SearchBox;
use super::styles::Palette;
use crate::state::{AppState, FocusPane, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title bar.
    pub header: Rect,
    /// Search box.
    pub search: Rect,
    /// List or detail pane.
    pub body: Rect,
    /// Key hints.
    pub status: Rect,
}

/// Split the frame into its fixed regions.
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    ScreenAreas {
        header: chunks[0],
        search: chunks[1],
        body: chunks[2],
        status: chunks[3],
    }
}

/// Rows visible inside the body pane of a frame of the given height.
pub fn body_viewport_rows(frame_height: u16) -> usize {
    let chrome = HEADER_HEIGHT + SEARCH_INPUT_HEIGHT + STATUS_BAR_HEIGHT + PANE_BORDER_LINES;
    usize::from(frame_height.saturating_sub(chrome)).max(1)
}

/// Render the whole UI for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, palette: &Palette) {
    let areas = screen_areas(frame.area());

    render_header(frame, areas.header, state, palette);
    frame.render_widget(
        SearchBox::new(
            state.search(),
            state.screen == Screen::List && state.focus == FocusPane::Search,
            palette,
        ),
        areas.search,
    );

    match state.screen {
        Screen::List => {
            render_character_list(frame, areas.body, state.list(), state.selected(), palette)
        }
        Screen::Detail => render_character_details(
            frame,
            areas.body,
            state.detail(),
            state.detail_scroll(),
            palette,
        ),
    }

    render_status_bar(frame, areas.status, state, palette);

    if state.help_visible {
        render_help_overlay(frame, palette);
    }
}

/// Header text: title plus a loading marker while any fetch is in flight.
pub fn header_line(state: &AppState, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::styled(" Star Wars Character Catalog ", palette.title)];
    if state.list().is_loading() || state.detail().is_loading() {
        spans.push(Span::styled(" ⟳ loading", palette.muted));
    }
    Line::from(spans)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    frame.render_widget(Paragraph::new(header_line(state, palette)), area);
}

/// Key hints for the current screen and focus.
pub fn status_line(state: &AppState, palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    let hints: &[(&'static str, &'static str)] = match (state.screen, state.focus) {
        (Screen::List, FocusPane::Search) => &[
            ("Enter", "search"),
            ("Ctrl+u", "clear"),
            ("Esc", "list"),
        ],
        (Screen::List, FocusPane::List) => &[
            ("/", "search"),
            ("j/k", "move"),
            ("Enter", "details"),
            ("n", "more"),
            ("?", "help"),
            ("q", "quit"),
        ],
        (Screen::Detail, _) => &[
            ("Esc", "back"),
            ("j/k", "scroll"),
            ("/", "search"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };
    for &(key, description) in hints {
        spans.extend(hint(key, description, palette));
    }

    let failed = match state.screen {
        Screen::List => state.list().error().is_some(),
        Screen::Detail => state.detail().error().is_some(),
    };
    if failed {
        spans.extend(hint("r", "retry", palette));
    }
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    frame.render_widget(Paragraph::new(status_line(state, palette)), area);
}
