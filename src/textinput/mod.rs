//! Single-line text input for entering timer durations.
//!
//! The input keeps its own value and cursor position, and only reacts to
//! keys while it is focused. The application decides which keys reach it;
//! navigation keys are consumed before the input sees them.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::textinput::new;
//!
//! let mut input = new();
//! input.set_placeholder("10s (e.g. 5m, 1h30m)");
//! input.set_char_limit(20);
//! input.set_width(30);
//! input.focus();
//!
//! input.set_value("1h30m");
//! assert_eq!(input.value(), "1h30m");
//! ```

pub mod keymap;
pub mod methods;
pub mod model;
pub mod view;

#[cfg(test)]
mod tests;

pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
