//! Core methods for the Model struct.

use super::model::Model;
use crate::Component;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

impl Model {
    /// Replaces the value, truncating it to the character limit.
    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().collect();
        if self.char_limit > 0 && runes.len() > self.char_limit {
            runes.truncate(self.char_limit);
        }
        self.value = runes;
        self.set_cursor(self.value.len());
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the end of the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
        self.handle_overflow();
    }

    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    pub fn focused(&self) -> bool {
        self.focus
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.set_cursor(0);
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        self.handle_overflow();
    }

    pub fn set_char_limit(&mut self, limit: usize) {
        self.char_limit = limit;
    }

    /// Applies an editing key. Returns `true` if the value changed.
    ///
    /// Ignored while blurred.
    pub fn update(&mut self, key_msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }

        let before = self.value.clone();
        let handled = self.handle_deletion_keys(key_msg)
            || self.handle_movement_keys(key_msg)
            || self.handle_character_input(key_msg);

        self.handle_overflow();
        handled && self.value != before
    }

    // Each handler returns whether it recognised the key.

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let keys = &self.key_map;

        if keys.delete_character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if keys.delete_character_forward.matches(key_msg) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if keys.delete_after_cursor.matches(key_msg) {
            self.value.truncate(self.pos);
        } else if keys.delete_before_cursor.matches(key_msg) {
            self.value.drain(..self.pos);
            self.offset = 0;
            self.pos = 0;
        } else {
            return false;
        }
        true
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let keys = &self.key_map;

        if keys.character_backward.matches(key_msg) {
            if self.pos > 0 {
                self.set_cursor(self.pos - 1);
            }
        } else if keys.character_forward.matches(key_msg) {
            self.set_cursor(self.pos + 1);
        } else if keys.line_start.matches(key_msg) {
            self.cursor_start();
        } else if keys.line_end.matches(key_msg) {
            self.cursor_end();
        } else {
            return false;
        }
        true
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) -> bool {
        // Shift is encoded in the character itself.
        let KeyCode::Char(ch) = key_msg.key else {
            return false;
        };
        if key_msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        self.insert_runes(&[ch]);
        true
    }

    pub(super) fn insert_runes(&mut self, runes: &[char]) {
        let avail = if self.char_limit > 0 {
            self.char_limit.saturating_sub(self.value.len())
        } else {
            usize::MAX
        };
        let take = runes.len().min(avail);
        if take == 0 {
            return;
        }

        let tail = self.value.split_off(self.pos);
        self.value.extend_from_slice(&runes[..take]);
        self.value.extend(tail);
        self.pos += take;
    }

    /// Keeps the cursor inside the visible window.
    pub(super) fn handle_overflow(&mut self) {
        if self.width == 0 || self.value.len() <= self.width {
            self.offset = 0;
            self.offset_right = self.value.len();
            return;
        }

        // Correct right offset if we've deleted characters
        self.offset_right = self.offset_right.min(self.value.len());

        if self.pos < self.offset {
            self.offset = self.pos;
            self.offset_right = (self.offset + self.width).min(self.value.len());
        } else if self.pos >= self.offset_right {
            self.offset_right = self.pos;
            self.offset = self.offset_right.saturating_sub(self.width);
        }
    }
}

impl Component for Model {
    fn focus(&mut self) {
        self.focus()
    }

    fn blur(&mut self) {
        self.blur()
    }

    fn focused(&self) -> bool {
        self.focused()
    }
}
