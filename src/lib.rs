//! # bubbletea-countdown
//!
//! A terminal countdown timer built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//! Type a duration, start as many timers as you like, and get a blinking
//! `Time's Up!` plus an alarm sound when one reaches zero.
//!
//! ## Overview
//!
//! The application follows the Elm Architecture: every key press, countdown
//! tick and blink tick is turned into an [`app::Event`], applied to the
//! [`App`] state, and the screen is re-rendered from the result.
//!
//! - [`duration`] parses what the user types (`"10s"`, `"5m"`, `"1h30m"`).
//! - [`timer`] owns the timers and counts them down.
//! - [`tick`] schedules the one-second countdown and half-second blink.
//! - [`focus`] moves keyboard focus between the input and the buttons.
//! - [`alarm`] plays, and cancels, the alarm sound.
//!
//! ## Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `tab` / `shift+tab` | Cycle focus through input and buttons |
//! | `left` / `right` | Move along the buttons, wrapping |
//! | `up` / `down` | Jump to the input / back to the last button |
//! | `enter` | Add a timer, or press the focused button |
//! | `q` / `ctrl+c` | Quit |
//! | any key while ringing | Dismiss the alarm |
//!
//! ## Embedding
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use std::sync::Arc;
//!
//! let mut app = App::new(&Config::default(), Arc::new(SilentPlayer));
//! app.handle(Event::SecondTick);
//! assert!(app.timers().is_empty());
//! ```

pub mod alarm;
pub mod app;
pub mod config;
pub mod duration;
pub mod focus;
pub mod key;
pub mod textinput;
pub mod tick;
pub mod timer;
pub mod view;

/// Components that can take and give up keyboard focus.
///
/// The application focuses the duration input when focus moves onto it
/// and blurs it when focus moves to a button.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// fn toggle<T: Component>(component: &mut T) {
///     if component.focused() {
///         component.blur();
///     } else {
///         component.focus();
///     }
/// }
///
/// let mut input = textinput_new();
/// toggle(&mut input);
/// assert!(input.focused());
/// ```
pub trait Component {
    /// Gives the component keyboard focus.
    fn focus(&mut self);

    /// Takes keyboard focus away.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use alarm::{AlarmHandle, AlarmManager, Player, SilentPlayer, SystemPlayer};
pub use app::{App, Event};
pub use config::Config;
pub use duration::{format_duration, parse as parse_duration, DurationError};
pub use focus::{Focus, FocusController, Nav};
pub use key::{new_binding, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use textinput::{new as textinput_new, Model as TextInput};
pub use timer::{Registry as TimerRegistry, TickReport, Timer};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
/// ```
pub mod prelude {
    pub use crate::alarm::{AlarmHandle, AlarmManager, BellPlayer, Player, SilentPlayer, SystemPlayer};
    pub use crate::app::{App, Event};
    pub use crate::config::{Config, SoundMode};
    pub use crate::duration::{format_duration, parse as parse_duration, DurationError};
    pub use crate::focus::{Focus, FocusController, Nav};
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::textinput::{new as textinput_new, Model as TextInput};
    pub use crate::timer::{Registry as TimerRegistry, TickReport, Timer};
    pub use crate::Component;
}
