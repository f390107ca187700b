//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the search input widget in lines (border + text).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines taken by a bordered pane's top and bottom edges.
pub const PANE_BORDER_LINES: u16 = 2;

/// Height of the error banner shown above a list that still has results.
pub const ERROR_BANNER_HEIGHT: u16 = 4;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// How long the event loop waits for input before checking fetch results.
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;
