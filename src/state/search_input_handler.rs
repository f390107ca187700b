//! Search input handling (pure state transitions).
//!
//! The cursor counts characters, not bytes, so editing is safe for any
//! UTF-8 input. All functions are pure: they take the input by value and
//! return the updated input.

/// Raw text of the search box with its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    /// Text as typed, untrimmed.
    pub query: String,
    /// Cursor position in characters, `0..=query.chars().count()`.
    pub cursor: usize,
}

impl SearchInput {
    /// Input holding `query` with the cursor at its end.
    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        let cursor = query.chars().count();
        Self { query, cursor }
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map_or(self.query.len(), |(offset, _)| offset)
    }
}

/// Insert `ch` at the cursor and advance the cursor.
pub fn handle_char_input(mut input: SearchInput, ch: char) -> SearchInput {
    let at = input.byte_offset(input.cursor);
    input.query.insert(at, ch);
    input.cursor += 1;
    input
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut input: SearchInput) -> SearchInput {
    if input.cursor > 0 {
        let at = input.byte_offset(input.cursor - 1);
        input.query.remove(at);
        input.cursor -= 1;
    }
    input
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut input: SearchInput) -> SearchInput {
    if input.cursor < input.char_len() {
        let at = input.byte_offset(input.cursor);
        input.query.remove(at);
    }
    input
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(mut input: SearchInput) -> SearchInput {
    input.cursor = input.cursor.saturating_sub(1);
    input
}

/// Move the cursor right, saturating at the end of the text.
pub fn handle_cursor_right(mut input: SearchInput) -> SearchInput {
    input.cursor = (input.cursor + 1).min(input.char_len());
    input
}

/// Move the cursor to the start.
pub fn handle_home(mut input: SearchInput) -> SearchInput {
    input.cursor = 0;
    input
}

/// Move the cursor to the end.
pub fn handle_end(mut input: SearchInput) -> SearchInput {
    input.cursor = input.char_len();
    input
}

/// Erase the whole query.
pub fn clear_input(_input: SearchInput) -> SearchInput {
    SearchInput::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
