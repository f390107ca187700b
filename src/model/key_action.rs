//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
/// Text typed into the search box bypasses this table entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Move selection up one row. Default: k/↑
    SelectPrev,
    /// Move selection down one row; past the last row loads more. Default: j/↓
    SelectNext,
    /// Move selection up one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Move selection down one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to first row. Default: g/Home
    SelectFirst,
    /// Jump to last loaded row. Default: G/End
    SelectLast,

    // Navigation
    /// Open the detail view for the selected character. Default: Enter/l/→
    OpenDetails,
    /// Return from the detail view to the list. Default: Esc/Backspace/h/←
    Back,

    // Fetching
    /// Fetch the next page of results. Default: n
    LoadMore,
    /// Repeat the last failed fetch. Default: r
    Retry,

    // Search
    /// Focus the search box. Default: //Ctrl+f
    StartSearch,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Toggle the help overlay. Default: ?
    Help,
}
