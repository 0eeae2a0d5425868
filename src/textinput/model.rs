//! Core model for the textinput component.

use super::keymap::{default_key_map, KeyMap};
use lipgloss_extras::prelude::*;

/// The text input state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value.
    pub prompt: String,
    pub prompt_style: Style,
    pub text_style: Style,

    /// Shown dimmed while the value is empty.
    pub placeholder: String,
    pub placeholder_style: Style,

    /// Style of the character under the cursor; rendered reversed.
    pub cursor_style: Style,

    pub(super) value: Vec<char>,
    pub(super) focus: bool,
    pub(super) pos: usize,

    /// Maximum number of characters displayed at once. 0 means no limit.
    pub width: usize,

    pub key_map: KeyMap,

    /// Maximum number of characters accepted. 0 means no limit.
    pub char_limit: usize,

    // First and one-past-last visible character when the value is wider
    // than `width`.
    pub(super) offset: usize,
    pub(super) offset_right: usize,
}

/// Creates an unfocused, empty input.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new(),
        value: Vec::new(),
        focus: false,
        pos: 0,
        width: 0,
        key_map: default_key_map(),
        char_limit: 0,
        offset: 0,
        offset_right: 0,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}
