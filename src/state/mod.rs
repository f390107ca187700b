//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI. Network
//! work leaves this module as [`Command`]s and returns as [`FetchEvent`]s.

pub mod app_state;
pub mod debounce;
pub mod detail_controller;
pub mod list_controller;
pub mod search_input_handler;

// Re-export for convenience
pub use app_state::{AppState, Command, FetchEvent, FocusPane, Screen};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use detail_controller::{DetailController, DetailRequest, DetailResponse};
pub use list_controller::{Applied, ListController, ListRequest, ListResponse};
pub use search_input_handler::SearchInput;
