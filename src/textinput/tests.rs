//! Tests for the textinput component.

use super::*;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

fn key(code: KeyCode) -> KeyMsg {
    KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    }
}

fn ctrl(c: char) -> KeyMsg {
    KeyMsg {
        key: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
    }
}

fn typed(s: &str) -> Model {
    let mut input = new();
    input.focus();
    for c in s.chars() {
        input.update(&key(KeyCode::Char(c)));
    }
    input
}

fn plain(s: String) -> String {
    String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
}

#[test]
fn test_new_default_values() {
    let input = new();

    assert_eq!(input.prompt, "> ");
    assert_eq!(input.placeholder, "");
    assert_eq!(input.char_limit, 0);
    assert_eq!(input.width, 0);
    assert_eq!(input.value(), "");
    assert_eq!(input.position(), 0);
    assert!(!input.focused());
}

#[test]
fn test_set_value() {
    let mut input = new();
    input.set_value("1h30m");

    assert_eq!(input.value(), "1h30m");
    assert_eq!(input.position(), 5);

    input.set_value("");
    assert_eq!(input.value(), "");
    assert_eq!(input.position(), 0);
}

#[test]
fn test_set_value_with_char_limit() {
    let mut input = new();
    input.set_char_limit(5);
    input.set_value("1h30m45s");

    assert_eq!(input.value(), "1h30m");
}

#[test]
fn test_set_cursor_clamps() {
    let mut input = new();
    input.set_value("hello");

    input.set_cursor(2);
    assert_eq!(input.position(), 2);

    input.set_cursor(100);
    assert_eq!(input.position(), 5);

    input.cursor_start();
    assert_eq!(input.position(), 0);
    input.cursor_end();
    assert_eq!(input.position(), 5);
}

#[test]
fn test_focus_and_blur() {
    let mut input = new();
    assert!(!input.focused());

    input.focus();
    assert!(input.focused());

    input.blur();
    assert!(!input.focused());
}

#[test]
fn test_typing_requires_focus() {
    let mut input = new();
    assert!(!input.update(&key(KeyCode::Char('5'))));
    assert_eq!(input.value(), "");

    input.focus();
    assert!(input.update(&key(KeyCode::Char('5'))));
    assert!(input.update(&key(KeyCode::Char('m'))));
    assert_eq!(input.value(), "5m");
}

#[test]
fn test_char_limit_stops_typing() {
    let mut input = typed("");
    input.set_char_limit(3);
    for c in "10s0".chars() {
        input.update(&key(KeyCode::Char(c)));
    }
    assert_eq!(input.value(), "10s");
}

#[test]
fn test_control_chars_are_not_inserted() {
    let mut input = typed("5m");
    assert!(!input.update(&ctrl('z')));
    assert_eq!(input.value(), "5m");
}

#[test]
fn test_backspace_and_delete() {
    let mut input = typed("10s");

    assert!(input.update(&key(KeyCode::Backspace)));
    assert_eq!(input.value(), "10");

    input.cursor_start();
    assert!(!input.update(&key(KeyCode::Backspace)));
    assert!(input.update(&key(KeyCode::Delete)));
    assert_eq!(input.value(), "0");
}

#[test]
fn test_insert_in_the_middle() {
    let mut input = typed("1h0m");
    input.set_cursor(2);
    input.update(&key(KeyCode::Char('3')));
    assert_eq!(input.value(), "1h30m");
    assert_eq!(input.position(), 3);
}

#[test]
fn test_line_editing_shortcuts() {
    let mut input = typed("1h30m");
    input.update(&ctrl('a'));
    assert_eq!(input.position(), 0);
    input.update(&ctrl('e'));
    assert_eq!(input.position(), 5);

    input.set_cursor(2);
    input.update(&ctrl('k'));
    assert_eq!(input.value(), "1h");

    input.update(&ctrl('u'));
    assert_eq!(input.value(), "");
    assert_eq!(input.position(), 0);
}

#[test]
fn test_movement_does_not_report_change() {
    let mut input = typed("5m");
    assert!(!input.update(&ctrl('b')));
    assert_eq!(input.position(), 1);
    assert!(!input.update(&ctrl('f')));
    assert_eq!(input.position(), 2);
}

#[test]
fn test_reset() {
    let mut input = typed("some text");
    input.reset();
    assert_eq!(input.value(), "");
    assert_eq!(input.position(), 0);
}

#[test]
fn test_view_shows_placeholder_when_empty() {
    let mut input = new();
    input.set_placeholder("10s (e.g. 5m, 1h30m)");
    assert_eq!(plain(input.view()), "> 10s (e.g. 5m, 1h30m)");

    input.focus();
    assert_eq!(plain(input.view()), "> 10s (e.g. 5m, 1h30m)");
}

#[test]
fn test_view_shows_value_and_cursor_cell() {
    let input = typed("90s");
    assert_eq!(plain(input.view()), "> 90s ");
}

#[test]
fn test_view_scrolls_with_width() {
    let mut input = typed("");
    input.set_width(4);
    for c in "1h30m15s".chars() {
        input.update(&key(KeyCode::Char(c)));
    }
    assert_eq!(plain(input.view()), "> m15s ");

    input.cursor_start();
    assert_eq!(plain(input.view()), "> 1h30");
}
