//! Application-level key bindings.

use crate::focus::Nav;
use crate::key::{self, new_binding, with_help, with_keys_str, Binding};
use bubbletea_rs::KeyMsg;

/// Keys the application handles before the text input sees them.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    pub next: Binding,
    pub prev: Binding,
    pub left: Binding,
    pub right: Binding,
    pub up: Binding,
    pub down: Binding,
    pub select: Binding,
    pub quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            next: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "navigate")]),
            prev: new_binding(vec![with_keys_str(&["shift+tab"]), with_help("shift+tab", "back")]),
            left: new_binding(vec![with_keys_str(&["left"]), with_help("←", "prev button")]),
            right: new_binding(vec![with_keys_str(&["right"]), with_help("→", "next button")]),
            up: new_binding(vec![with_keys_str(&["up"]), with_help("↑", "input")]),
            down: new_binding(vec![with_keys_str(&["down"]), with_help("↓", "buttons")]),
            select: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "select")]),
            quit: new_binding(vec![with_keys_str(&["q", "ctrl+c"]), with_help("q", "quit")]),
        }
    }
}

impl AppKeyMap {
    /// The navigation a key press asks for, if any.
    pub fn nav(&self, msg: &KeyMsg) -> Option<Nav> {
        [
            (&self.next, Nav::Tab),
            (&self.prev, Nav::BackTab),
            (&self.left, Nav::Left),
            (&self.right, Nav::Right),
            (&self.up, Nav::Up),
            (&self.down, Nav::Down),
        ]
        .into_iter()
        .find(|(binding, _)| binding.matches(msg))
        .map(|(_, nav)| nav)
    }
}

impl key::KeyMap for AppKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.select, &self.quit]
    }
}
