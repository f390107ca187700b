//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings. Only consulted while the list or
/// detail screen has focus; the search box consumes keys itself.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&normalize(key)).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

/// Strip state and kind so lookups match on code and modifiers only.
///
/// Shift is dropped for characters since the case already encodes it
/// (`G` arrives as `Char('G')` with or without SHIFT depending on terminal).
fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    KeyEvent::new(key.code, modifiers)
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut kb = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;

        // Selection
        kb.bind(KeyCode::Char('k'), none, KeyAction::SelectPrev);
        kb.bind(KeyCode::Up, none, KeyAction::SelectPrev);
        kb.bind(KeyCode::Char('j'), none, KeyAction::SelectNext);
        kb.bind(KeyCode::Down, none, KeyAction::SelectNext);
        kb.bind(KeyCode::Char('u'), ctrl, KeyAction::PageUp);
        kb.bind(KeyCode::PageUp, none, KeyAction::PageUp);
        kb.bind(KeyCode::Char('d'), ctrl, KeyAction::PageDown);
        kb.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        kb.bind(KeyCode::Char('g'), none, KeyAction::SelectFirst);
        kb.bind(KeyCode::Home, none, KeyAction::SelectFirst);
        kb.bind(KeyCode::Char('G'), none, KeyAction::SelectLast);
        kb.bind(KeyCode::End, none, KeyAction::SelectLast);

        // Navigation
        kb.bind(KeyCode::Enter, none, KeyAction::OpenDetails);
        kb.bind(KeyCode::Char('l'), none, KeyAction::OpenDetails);
        kb.bind(KeyCode::Right, none, KeyAction::OpenDetails);
        kb.bind(KeyCode::Esc, none, KeyAction::Back);
        kb.bind(KeyCode::Backspace, none, KeyAction::Back);
        kb.bind(KeyCode::Char('h'), none, KeyAction::Back);
        kb.bind(KeyCode::Left, none, KeyAction::Back);

        // Fetching
        kb.bind(KeyCode::Char('n'), none, KeyAction::LoadMore);
        kb.bind(KeyCode::Char('r'), none, KeyAction::Retry);

        // Search
        kb.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);
        kb.bind(KeyCode::Char('f'), ctrl, KeyAction::StartSearch);

        // Application
        kb.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        kb.bind(KeyCode::Char('c'), ctrl, KeyAction::Quit);
        kb.bind(KeyCode::Char('?'), none, KeyAction::Help);

        kb
    }
}
