//! Color configuration and the style palette shared by all widgets.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Config with colors forced on or off.
    pub fn with_colors(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Styles for every visual role in the UI.
///
/// With colors disabled only modifiers (bold, reversed, dim) remain, so the
/// selection and headings stay distinguishable on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Application title in the header.
    pub title: Style,
    /// Section headings.
    pub heading: Style,
    /// Field labels in the detail view.
    pub label: Style,
    /// Field values in the detail view.
    pub value: Style,
    /// Highlighted list row.
    pub selected: Style,
    /// Hints and secondary text.
    pub muted: Style,
    /// Error panel.
    pub error: Style,
    /// Key names in hints and help.
    pub key: Style,
    /// Border of the focused widget.
    pub focused_border: Style,
    /// Cursor cell in the search box.
    pub cursor: Style,
}

impl Palette {
    /// Build the palette for the given color configuration.
    pub fn new(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                title: bold.fg(Color::Yellow),
                heading: bold.fg(Color::Yellow),
                label: Style::default().fg(Color::Gray),
                value: bold.fg(Color::White),
                selected: bold.fg(Color::Black).bg(Color::Yellow),
                muted: Style::default().fg(Color::DarkGray),
                error: bold.fg(Color::Red),
                key: bold.fg(Color::Yellow),
                focused_border: Style::default().fg(Color::Yellow),
                cursor: bold.fg(Color::Black).bg(Color::White),
            }
        } else {
            Self {
                title: bold,
                heading: bold,
                label: Style::default(),
                value: bold,
                selected: Style::default().add_modifier(Modifier::REVERSED),
                muted: Style::default().add_modifier(Modifier::DIM),
                error: bold,
                key: bold,
                focused_border: bold,
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
