//! Tests for search input handler.

use super::*;

fn typed(text: &str) -> SearchInput {
    text.chars()
        .fold(SearchInput::default(), handle_char_input)
}

// ===== handle_char_input =====

#[test]
fn typing_appends_and_advances_cursor() {
    let input = typed("luke");
    assert_eq!(input.query, "luke");
    assert_eq!(input.cursor, 4);
}

#[test]
fn typing_inserts_at_cursor() {
    let input = handle_cursor_left(typed("lke"));
    let input = handle_cursor_left(input);
    let input = handle_char_input(input, 'u');
    assert_eq!(input.query, "luke");
    assert_eq!(input.cursor, 2);
}

#[test]
fn typing_multibyte_characters() {
    let input = typed("Padmé");
    assert_eq!(input.cursor, 5);
    let input = handle_char_input(handle_cursor_left(input), 'x');
    assert_eq!(input.query, "Padmxé");
}

// ===== handle_backspace / handle_delete =====

#[test]
fn backspace_removes_previous_char() {
    let input = handle_backspace(typed("lukee"));
    assert_eq!(input.query, "luke");
    assert_eq!(input.cursor, 4);
}

#[test]
fn backspace_at_start_is_noop() {
    let input = handle_home(typed("han"));
    let after = handle_backspace(input.clone());
    assert_eq!(after, input);
}

#[test]
fn backspace_multibyte() {
    let input = handle_backspace(typed("Padmé"));
    assert_eq!(input.query, "Padm");
}

#[test]
fn delete_removes_char_under_cursor() {
    let input = handle_delete(handle_home(typed("xleia")));
    assert_eq!(input.query, "leia");
    assert_eq!(input.cursor, 0);
}

#[test]
fn delete_at_end_is_noop() {
    let input = typed("leia");
    assert_eq!(handle_delete(input.clone()), input);
}

// ===== cursor movement =====

#[test]
fn cursor_right_saturates_at_end() {
    let input = handle_cursor_right(typed("r2"));
    assert_eq!(input.cursor, 2);
}

#[test]
fn cursor_left_saturates_at_zero() {
    let input = handle_cursor_left(SearchInput::default());
    assert_eq!(input.cursor, 0);
}

#[test]
fn home_and_end_jump() {
    let input = handle_home(typed("chewbacca"));
    assert_eq!(input.cursor, 0);
    assert_eq!(handle_end(input).cursor, 9);
}

// ===== clear / with_query =====

#[test]
fn clear_empties_query() {
    assert_eq!(clear_input(typed("vader")), SearchInput::default());
}

#[test]
fn with_query_places_cursor_at_end() {
    let input = SearchInput::with_query("Obi-Wan");
    assert_eq!(input.cursor, 7);
}
