//! Character detail pane.
//!
//! Formatting helpers are pure so the sentinel handling ("unknown", "n/a")
//! can be tested without a terminal.

use super::character_list::error_lines;
use super::constants::PANE_BORDER_LINES;
use super::helpers::{empty_line, key_value_line};
use super::styles::Palette;
use crate::model::CharacterDetails;
use crate::state::DetailController;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const LABEL_WIDTH: usize = 22;

/// Display text for a raw attribute; sentinels and blanks become "Unknown".
pub fn format_value(raw: &str) -> String {
    if is_unknown(raw) {
        "Unknown".to_string()
    } else {
        raw.trim().to_string()
    }
}

/// Display text for a measurement, with `unit` appended only to real values.
pub fn format_measure(raw: &str, unit: &str) -> String {
    if is_unknown(raw) {
        "Unknown".to_string()
    } else {
        format!("{} {unit}", raw.trim())
    }
}

fn is_unknown(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.eq_ignore_ascii_case("unknown") || raw.eq_ignore_ascii_case("n/a")
}

/// Attribute rows in display order.
pub fn attribute_rows(details: &CharacterDetails) -> Vec<(&'static str, String)> {
    vec![
        ("Height", format_measure(&details.height, "cm")),
        ("Mass", format_measure(&details.mass, "kg")),
        ("Birth Year", format_value(&details.birth_year)),
        ("Gender", format_value(&details.gender)),
        ("Eye Color", format_value(&details.eye_color)),
        ("Hair Color", format_value(&details.hair_color)),
        ("Skin Color", format_value(&details.skin_color)),
    ]
}

/// "Additional Information" rows.
pub fn additional_rows(details: &CharacterDetails) -> Vec<(&'static str, String)> {
    let id = details
        .uid
        .as_ref()
        .map_or_else(|| "Unknown".to_string(), ToString::to_string);
    let homeworld = if details.homeworld.trim().is_empty() {
        "Unknown"
    } else {
        "Available via API"
    };
    let films = match details.films.len() {
        0 => "None listed".to_string(),
        n => format!("{n} film(s)"),
    };
    let created = details
        .created_at()
        .map_or_else(|| "Unknown".to_string(), |t| t.format("%Y-%m-%d").to_string());

    vec![
        ("Character ID", id),
        ("Homeworld", homeworld.to_string()),
        ("Films", films),
        ("Vehicles & Starships", format!("{} total", details.craft_count())),
        ("Created", created),
    ]
}

/// Rows the record occupies: title, subtitle, blank, attributes, blank,
/// heading, additional rows.
fn record_rows(details: &CharacterDetails) -> usize {
    5 + attribute_rows(details).len() + additional_rows(details).len()
}

/// Furthest the pane can scroll when `viewport_rows` rows are visible.
///
/// Zero unless a record is on screen.
pub fn max_scroll(detail: &DetailController, viewport_rows: usize) -> u16 {
    if detail.error().is_some() || detail.is_loading() {
        return 0;
    }
    detail.details().map_or(0, |details| {
        let hidden = record_rows(details).saturating_sub(viewport_rows);
        u16::try_from(hidden).unwrap_or(u16::MAX)
    })
}

fn detail_lines(details: &CharacterDetails, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(details.name.clone(), palette.title)),
        Line::from(Span::styled("Star Wars Character Profile", palette.muted)),
        empty_line(),
    ];
    lines.extend(
        attribute_rows(details)
            .into_iter()
            .map(|(label, value)| key_value_line(label, value, LABEL_WIDTH, palette)),
    );
    lines.push(empty_line());
    lines.push(Line::from(Span::styled("Additional Information", palette.heading)));
    lines.extend(
        additional_rows(details)
            .into_iter()
            .map(|(label, value)| key_value_line(label, value, LABEL_WIDTH, palette)),
    );
    lines
}

/// Render the detail pane into `area`, skipping the first `scroll` rows of
/// the record.
pub fn render_character_details(
    frame: &mut Frame,
    area: Rect,
    detail: &DetailController,
    scroll: u16,
    palette: &Palette,
) {
    let block = Block::default().borders(Borders::ALL).title(" Character ");

    let paragraph = if let Some(error) = detail.error() {
        Paragraph::new(error_lines(error, palette)).alignment(Alignment::Center)
    } else if detail.is_loading() {
        Paragraph::new(Line::from(Span::styled("Loading character...", palette.muted)))
            .alignment(Alignment::Center)
    } else if let Some(details) = detail.details() {
        let viewport = usize::from(area.height.saturating_sub(PANE_BORDER_LINES));
        let offset = scroll.min(max_scroll(detail, viewport));
        Paragraph::new(detail_lines(details, palette)).scroll((offset, 0))
    } else {
        Paragraph::new(Line::from(Span::styled(
            "No character details available.",
            palette.muted,
        )))
        .alignment(Alignment::Center)
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}
