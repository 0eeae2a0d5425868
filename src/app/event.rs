//! The closed set of events the application reacts to.

use crate::tick::{BlinkTickMsg, SecondTickMsg};
use bubbletea_rs::{KeyMsg, Msg, WindowSizeMsg};

/// One input to the state machine.
#[derive(Debug)]
pub enum Event {
    /// A key press.
    Key(KeyMsg),
    /// The one-second countdown tick.
    SecondTick,
    /// The half-second blink tick.
    BlinkTick,
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
}

impl Event {
    /// Converts a runtime message. Messages the application does not handle
    /// give `None`.
    pub fn from_msg(msg: &Msg) -> Option<Self> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return Some(Event::Key(KeyMsg {
                key: key.key,
                modifiers: key.modifiers,
            }));
        }
        if msg.downcast_ref::<SecondTickMsg>().is_some() {
            return Some(Event::SecondTick);
        }
        if msg.downcast_ref::<BlinkTickMsg>().is_some() {
            return Some(Event::BlinkTick);
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return Some(Event::Resize {
                width: size.width,
                height: size.height,
            });
        }
        None
    }
}
