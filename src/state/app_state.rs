//! Application state and transitions.
//!
//! AppState is the root state type. It owns the search box, the debouncer and
//! both fetch controllers, and turns user intent into [`Command`]s for the
//! shell to execute. Nothing here touches the terminal or the network.

use super::debounce::Debouncer;
use super::detail_controller::{DetailController, DetailRequest, DetailResponse};
use super::list_controller::{Applied, ListController, ListRequest, ListResponse};
use super::search_input_handler::SearchInput;
use crate::model::CharacterSummary;
use std::time::{Duration, Instant};
use tokio::task::AbortHandle;
use tracing::debug;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Searchable character list.
    #[default]
    List,
    /// One character's full record.
    Detail,
}

/// Which widget receives typed characters on the list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPane {
    /// Keys edit the search box.
    Search,
    /// Keys navigate the list.
    #[default]
    List,
}

/// Network work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a page of summaries.
    FetchList(ListRequest),
    /// Fetch one character's record.
    FetchDetail(DetailRequest),
}

/// A completed fetch, delivered back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A list request finished.
    List(ListResponse),
    /// A detail request finished.
    Detail(DetailResponse),
}

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Screen**: List ⇄ Detail (via `open_selected` and `back`)
/// - **Focus**: Search ⇄ List on the list screen (via `focus_search`, `focus_list`)
/// - **Search**: every edit restarts the debounce interval; the settled text
///   becomes the list query once it differs from the active one
#[derive(Debug)]
pub struct AppState {
    /// Screen currently showing.
    pub screen: Screen,

    /// Keyboard focus on the list screen.
    pub focus: FocusPane,

    /// Whether the help overlay is visible.
    pub help_visible: bool,

    search: SearchInput,
    debouncer: Debouncer<String>,
    list: ListController,
    detail: DetailController,
    selected: Option<usize>,
    detail_scroll: u16,
}

impl AppState {
    /// Create state with the given page size and debounce interval.
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            screen: Screen::List,
            focus: FocusPane::List,
            help_visible: false,
            search: SearchInput::default(),
            debouncer: Debouncer::new(debounce),
            list: ListController::new(page_size),
            detail: DetailController::new(),
            selected: None,
            detail_scroll: 0,
        }
    }

    /// Pre-fill the search box before [`start`](Self::start).
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.search = SearchInput::with_query(query);
        self
    }

    /// Issue the initial fetch for whatever the search box holds.
    pub fn start(&mut self) -> Command {
        self.debouncer.cancel();
        self.selected = None;
        Command::FetchList(self.list.set_query(self.search.query.clone()))
    }

    // ===== Search =====

    /// Give the search box keyboard focus.
    pub fn focus_search(&mut self) {
        self.back();
        self.focus = FocusPane::Search;
    }

    /// Return keyboard focus to the list.
    pub fn focus_list(&mut self) {
        self.focus = FocusPane::List;
    }

    /// Search box contents.
    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    /// Apply an edit to the search box observed at `now`.
    ///
    /// Text changes restart the debounce interval; pure cursor moves do not.
    pub fn edit_search(&mut self, edit: impl FnOnce(SearchInput) -> SearchInput, now: Instant) {
        let before = std::mem::take(&mut self.search);
        let previous = before.query.clone();
        self.search = edit(before);
        if self.search.query != previous {
            self.debouncer.push(self.search.query.clone(), now);
        }
    }

    /// Propagate the search box immediately, skipping the debounce interval.
    pub fn submit_search(&mut self) -> Option<Command> {
        self.debouncer.cancel();
        self.focus = FocusPane::List;
        self.propagate(self.search.query.clone())
    }

    /// Propagate a debounced query whose interval has elapsed by `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Command> {
        let settled = self.debouncer.poll(now)?;
        self.propagate(settled)
    }

    /// When [`tick`](Self::tick) next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn propagate(&mut self, query: String) -> Option<Command> {
        if query.trim() == self.list.query().trim() {
            debug!(query = %query, "Debounced query unchanged");
            return None;
        }
        self.selected = None;
        Some(Command::FetchList(self.list.set_query(query)))
    }

    // ===== List navigation =====

    /// Index of the highlighted row.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Summary under the highlight.
    pub fn selected_character(&self) -> Option<&CharacterSummary> {
        self.selected.and_then(|i| self.list.characters().get(i))
    }

    /// Move the highlight up one row.
    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    /// Move the highlight down one row. Moving past the last row loads more.
    pub fn select_next(&mut self) -> Option<Command> {
        if self.at_last_row() {
            return self.load_more();
        }
        self.move_selection(1);
        None
    }

    /// Move the highlight up by `rows`.
    pub fn page_up(&mut self, rows: usize) {
        self.move_selection(-(rows.max(1) as isize));
    }

    /// Move the highlight down by `rows`. Paging from the last row loads more.
    pub fn page_down(&mut self, rows: usize) -> Option<Command> {
        if self.at_last_row() {
            return self.load_more();
        }
        self.move_selection(rows.max(1) as isize);
        None
    }

    /// Highlight the first row.
    pub fn select_first(&mut self) {
        if !self.list.characters().is_empty() {
            self.selected = Some(0);
        }
    }

    /// Highlight the last loaded row.
    pub fn select_last(&mut self) {
        let len = self.list.characters().len();
        if len > 0 {
            self.selected = Some(len - 1);
        }
    }

    fn at_last_row(&self) -> bool {
        let len = self.list.characters().len();
        len > 0 && self.selected == Some(len - 1)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.list.characters().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, len as isize - 1);
        self.selected = Some(target as usize);
    }

    /// Request the next page of the active query.
    pub fn load_more(&mut self) -> Option<Command> {
        self.list.load_more().map(Command::FetchList)
    }

    // ===== Detail =====

    /// Show the highlighted character's record.
    pub fn open_selected(&mut self) -> Option<Command> {
        let locator = self.selected_character()?.locator();
        self.screen = Screen::Detail;
        self.help_visible = false;
        self.detail_scroll = 0;
        self.detail.set_target(Some(locator)).map(Command::FetchDetail)
    }

    /// Leave the detail screen and drop its record.
    pub fn back(&mut self) {
        if self.screen == Screen::Detail {
            self.screen = Screen::List;
            self.detail_scroll = 0;
            self.detail.set_target(None);
        }
    }

    /// First visible row of the detail record.
    pub fn detail_scroll(&self) -> u16 {
        self.detail_scroll
    }

    /// Scroll the detail record down by `rows`, stopping at `max`.
    pub fn scroll_detail_down(&mut self, rows: u16, max: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(rows).min(max);
    }

    /// Scroll the detail record up by `rows`.
    pub fn scroll_detail_up(&mut self, rows: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(rows);
    }

    // ===== Fetch plumbing =====

    /// Re-issue whichever fetch failed on the current screen.
    pub fn retry(&mut self) -> Option<Command> {
        match self.screen {
            Screen::List => self.list.retry().map(Command::FetchList),
            Screen::Detail => self.detail.retry().map(Command::FetchDetail),
        }
    }

    /// Attach the task executing `command` so it is aborted when superseded.
    pub fn track(&mut self, command: &Command, handle: AbortHandle) {
        match command {
            Command::FetchList(request) if request.generation == self.list.generation() => {
                self.list.track(handle)
            }
            Command::FetchDetail(request) if request.generation == self.detail.generation() => {
                self.detail.track(handle)
            }
            _ => handle.abort(),
        }
    }

    /// Apply a completed fetch.
    pub fn apply(&mut self, event: FetchEvent) -> Applied {
        match event {
            FetchEvent::List(response) => {
                let applied = self.list.apply(response);
                if applied == Applied::Current {
                    self.clamp_selection();
                }
                applied
            }
            FetchEvent::Detail(response) => self.detail.apply(response),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.list.characters().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(0),
            Some(i) => Some(i.min(len - 1)),
        };
    }

    /// List controller (read-only).
    pub fn list(&self) -> &ListController {
        &self.list
    }

    /// Detail controller (read-only).
    pub fn detail(&self) -> &DetailController {
        &self.detail
    }

    /// Stop all background work before exit: abort both fetches and drop
    /// any search still waiting out its interval.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.list.cancel();
        self.detail.cancel();
        debug!("Application state shut down");
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
