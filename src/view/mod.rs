//! TUI rendering and terminal management (impure shell)

mod character_details;
mod character_list;
pub mod constants;
mod help;
mod helpers;
mod layout;
mod search_input;
mod styles;

pub use character_details::{format_measure, format_value};
pub use character_list::empty_message;
pub use help::render_help_overlay;
pub use layout::render_layout;
pub use search_input::SearchBox;
pub use styles::{ColorConfig, Palette};

use crate::api::{CatalogApi, Dispatcher, FetchEvent};
use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::state::search_input_handler::{
    clear_input, handle_backspace, handle_char_input, handle_cursor_left, handle_cursor_right,
    handle_delete, handle_end, handle_home,
};
use crate::state::{AppState, Applied, Command, FocusPane, Screen};
use constants::EVENT_POLL_INTERVAL_MS;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(io) => AppError::Terminal(io),
        }
    }
}

/// Startup options for the TUI.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Summaries requested per page.
    pub page_size: u32,
    /// Search debounce interval.
    pub debounce: Duration,
    /// Query to search for on startup.
    pub initial_query: Option<String>,
    /// Color output.
    pub colors: ColorConfig,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    dispatcher: Dispatcher,
    events: UnboundedReceiver<FetchEvent>,
    palette: Palette,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        app_state: AppState,
        dispatcher: Dispatcher,
        events: UnboundedReceiver<FetchEvent>,
        palette: Palette,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            dispatcher,
            events,
            palette,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Between key events the loop
    /// drains finished fetches and fires the search debouncer, waking no
    /// later than the debounce deadline.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let initial = self.app_state.start();
        self.execute(Some(initial));

        // Initial render - ensures screen has content immediately
        self.draw()?;

        loop {
            let mut dirty = self.pump(Instant::now());

            if event::poll(self.poll_timeout(Instant::now()))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                        dirty = true;
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Fire the debouncer and apply finished fetches.
    ///
    /// Returns true if anything changed that needs a redraw.
    fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(command) = self.app_state.tick(now) {
            self.execute(Some(command));
            changed = true;
        }
        while let Ok(event) = self.events.try_recv() {
            if self.app_state.apply(event) == Applied::Current {
                changed = true;
            }
        }
        changed
    }

    /// How long to block on terminal input.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let interval = Duration::from_millis(EVENT_POLL_INTERVAL_MS);
        match self.app_state.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(interval),
            None => interval,
        }
    }

    /// Hand a command to the dispatcher and attach its abort handle.
    fn execute(&mut self, command: Option<Command>) {
        let Some(command) = command else {
            return;
        };
        let handle = self.dispatcher.dispatch(&command);
        self.app_state.track(&command, handle);
    }

    fn page_rows(&self) -> usize {
        let height = self.terminal.size().map(|s| s.height).unwrap_or(24);
        layout::body_viewport_rows(height)
    }

    /// Furthest the detail record can scroll in the current terminal.
    fn detail_scroll_limit(&self) -> u16 {
        character_details::max_scroll(self.app_state.detail(), self.page_rows())
    }

    fn scroll_detail_down(&mut self, rows: usize) {
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        let limit = self.detail_scroll_limit();
        self.app_state.scroll_detail_down(rows, limit);
    }

    fn scroll_detail_up(&mut self, rows: usize) {
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);
        self.app_state.scroll_detail_up(rows);
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.quit();
        }

        // Help overlay swallows everything except its own dismissal and quit
        if self.app_state.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.help_visible = false,
                KeyCode::Char('q') => return self.quit(),
                _ => {}
            }
            return false;
        }

        if self.app_state.screen == Screen::List && self.app_state.focus == FocusPane::Search {
            self.handle_search_key(key, now);
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false; // Unknown key, ignore
        };
        debug!(?action, screen = ?self.app_state.screen, "Key action");

        match (self.app_state.screen, action) {
            (_, KeyAction::Quit) => return self.quit(),
            (_, KeyAction::Help) => self.app_state.toggle_help(),
            (_, KeyAction::StartSearch) => self.app_state.focus_search(),
            (_, KeyAction::Retry) => {
                let command = self.app_state.retry();
                self.execute(command);
            }

            (Screen::List, KeyAction::SelectPrev) => self.app_state.select_prev(),
            (Screen::List, KeyAction::SelectNext) => {
                let command = self.app_state.select_next();
                self.execute(command);
            }
            (Screen::List, KeyAction::PageUp) => self.app_state.page_up(self.page_rows()),
            (Screen::List, KeyAction::PageDown) => {
                let command = self.app_state.page_down(self.page_rows());
                self.execute(command);
            }
            (Screen::List, KeyAction::SelectFirst) => self.app_state.select_first(),
            (Screen::List, KeyAction::SelectLast) => self.app_state.select_last(),
            (Screen::List, KeyAction::LoadMore) => {
                let command = self.app_state.load_more();
                self.execute(command);
            }
            (Screen::List, KeyAction::OpenDetails) => {
                let command = self.app_state.open_selected();
                self.execute(command);
            }

            (Screen::Detail, KeyAction::Back) => self.app_state.back(),
            (Screen::Detail, KeyAction::SelectNext) => self.scroll_detail_down(1),
            (Screen::Detail, KeyAction::SelectPrev) => self.scroll_detail_up(1),
            (Screen::Detail, KeyAction::PageDown) => self.scroll_detail_down(self.page_rows()),
            (Screen::Detail, KeyAction::PageUp) => self.scroll_detail_up(self.page_rows()),
            (Screen::Detail, KeyAction::SelectFirst) => self.scroll_detail_up(usize::MAX),
            (Screen::Detail, KeyAction::SelectLast) => self.scroll_detail_down(usize::MAX),

            // Remaining actions do not apply to the current screen
            _ => {}
        }
        false
    }

    /// Abort background work; always returns true so callers can
    /// `return self.quit()`.
    fn quit(&mut self) -> bool {
        self.app_state.shutdown();
        true
    }

    /// Keys typed while the search box has focus.
    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.app_state.edit_search(clear_input, now),
            KeyCode::Char(ch) if !ctrl => {
                self.app_state.edit_search(|input| handle_char_input(input, ch), now)
            }
            KeyCode::Backspace => self.app_state.edit_search(handle_backspace, now),
            KeyCode::Delete => self.app_state.edit_search(handle_delete, now),
            KeyCode::Left => self.app_state.edit_search(handle_cursor_left, now),
            KeyCode::Right => self.app_state.edit_search(handle_cursor_right, now),
            KeyCode::Home => self.app_state.edit_search(handle_home, now),
            KeyCode::End => self.app_state.edit_search(handle_end, now),
            KeyCode::Enter => {
                let command = self.app_state.submit_search();
                self.execute(command);
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Down => self.app_state.focus_list(),
            _ => {}
        }
    }

    /// Render the current state
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let palette = &self.palette;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, palette);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        dispatcher: Dispatcher,
        events: UnboundedReceiver<FetchEvent>,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            dispatcher,
            events,
            palette: Palette::new(ColorConfig::with_colors(false)),
        }
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Handle a keyboard event observed at `now` (test-only accessor)
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key_at(key, now)
    }

    /// Issue the initial fetch (test-only accessor)
    pub(crate) fn start_test(&mut self) {
        let initial = self.app_state.start();
        self.execute(Some(initial));
    }

    /// Run one loop iteration without terminal input (test-only accessor)
    pub(crate) fn pump_test(&mut self, now: Instant) -> bool {
        self.pump(now)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(api: Arc<dyn CatalogApi>, runtime: Handle, options: ViewOptions) -> Result<(), TuiError> {
    let (dispatcher, events) = Dispatcher::new(api, runtime);
    let mut app_state = AppState::new(options.page_size, options.debounce);
    if let Some(query) = options.initial_query {
        app_state = app_state.with_initial_query(query);
    }

    let mut app = TuiApp::new(app_state, dispatcher, events, Palette::new(options.colors))?;
    info!("TUI started");

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Dropping the app aborts any fetch still in flight
    drop(app);

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
