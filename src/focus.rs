//! Keyboard focus across the fixed row of controls.
//!
//! The controls are the duration input followed by five buttons. Tab and
//! shift+tab cycle through all six. Left and right only move along the
//! button row, wrapping at either end, and remember the button they land
//! on; up jumps to the input and down jumps back to the remembered button
//! (or the first one if none has been visited yet).
//!
//! ```rust
//! use bubbletea_countdown::focus::{Focus, FocusController, Nav};
//!
//! let mut focus = FocusController::new();
//! focus.navigate(Nav::Down);
//! assert_eq!(focus.current(), Focus::Add);
//! focus.navigate(Nav::Right);
//! focus.navigate(Nav::Up);
//! assert_eq!(focus.current(), Focus::Input);
//! focus.navigate(Nav::Down);
//! assert_eq!(focus.current(), Focus::Start);
//! ```

use std::fmt;

/// One focusable control, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    Input,
    Add,
    Start,
    Stop,
    Reset,
    Quit,
}

impl Focus {
    /// Every control in tab order.
    pub const ALL: [Focus; 6] = [
        Focus::Input,
        Focus::Add,
        Focus::Start,
        Focus::Stop,
        Focus::Reset,
        Focus::Quit,
    ];

    /// The buttons, left to right.
    pub const BUTTONS: [Focus; 5] = [
        Focus::Add,
        Focus::Start,
        Focus::Stop,
        Focus::Reset,
        Focus::Quit,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The next control in tab order, wrapping from the last to the first.
    pub fn next(self) -> Focus {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The previous control in tab order, wrapping from the first to the last.
    pub fn prev(self) -> Focus {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Button caption; the input has none.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Focus::Input => None,
            Focus::Add => Some("Add"),
            Focus::Start => Some("Start"),
            Focus::Stop => Some("Stop"),
            Focus::Reset => Some("Reset"),
            Focus::Quit => Some("Quit"),
        }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("Input"))
    }
}

/// A navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
}

/// The focus cursor plus the last button reached with left/right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusController {
    current: Focus,
    // Input means no button has been remembered yet.
    memory: Focus,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Focus {
        self.current
    }

    /// The button `down` returns to from the input.
    pub fn memory(&self) -> Focus {
        self.memory
    }

    /// Applies one navigation key and returns the new focus.
    pub fn navigate(&mut self, nav: Nav) -> Focus {
        let s = self.current;
        match nav {
            Nav::Tab => self.current = s.next(),
            Nav::BackTab => self.current = s.prev(),
            Nav::Left => match s {
                Focus::Input => {}
                Focus::Add => self.remember(Focus::Quit),
                _ => self.remember(s.prev()),
            },
            Nav::Right => match s {
                Focus::Input => {}
                Focus::Quit => self.remember(Focus::Add),
                _ => self.remember(s.next()),
            },
            Nav::Up => self.current = Focus::Input,
            Nav::Down => {
                if s == Focus::Input {
                    self.current = match self.memory {
                        Focus::Input => Focus::Add,
                        remembered => remembered,
                    };
                }
            }
        }
        self.current
    }

    fn remember(&mut self, focus: Focus) {
        self.current = focus;
        self.memory = focus;
    }
}
