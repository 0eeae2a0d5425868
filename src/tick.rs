//! The two periodic event sources.
//!
//! Both are one-shot `bubbletea_rs::tick` commands that the application
//! re-issues every time it handles the resulting message, so each source
//! keeps running for as long as its message is handled. Forgetting to
//! re-issue one stalls that subsystem for good.
//!
//! - [`SecondTickMsg`] every [`SECOND_INTERVAL`] drives the countdown.
//! - [`BlinkTickMsg`] every [`BLINK_INTERVAL`] drives the alarm blink.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

/// How often the countdown advances, and by how much.
pub const SECOND_INTERVAL: Duration = Duration::from_secs(1);

/// How often the alarm blink flag flips.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Delivered once per [`SECOND_INTERVAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondTickMsg;

/// Delivered once per [`BLINK_INTERVAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTickMsg;

/// Schedules the next countdown tick.
pub fn second_tick() -> Cmd {
    bubbletea_tick(SECOND_INTERVAL, |_| Box::new(SecondTickMsg) as Msg)
}

/// Schedules the next blink tick.
pub fn blink_tick() -> Cmd {
    bubbletea_tick(BLINK_INTERVAL, |_| Box::new(BlinkTickMsg) as Msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_second_tick_delivers_message() {
        let msg = second_tick().await.expect("tick should produce a message");
        assert!(msg.downcast_ref::<SecondTickMsg>().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blink_tick_delivers_message() {
        let msg = blink_tick().await.expect("tick should produce a message");
        assert!(msg.downcast_ref::<BlinkTickMsg>().is_some());
    }
}
