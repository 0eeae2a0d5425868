//! Countdown timers and the registry that owns them.
//!
//! Every timer counts down from the duration it was created with. Timers are
//! kept in creation order, which is also the order they are displayed in.
//! Start and stop act on the whole registry at once; a timer that has
//! finished stays finished until the registry is cleared.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::timer::Registry;
//! use std::time::Duration;
//!
//! let mut timers = Registry::new();
//! let id = timers.create(Duration::from_secs(2)).id();
//! assert_eq!(id, 1);
//!
//! timers.tick(Duration::from_secs(1));
//! let report = timers.tick(Duration::from_secs(1));
//! assert_eq!(report.finished, vec![1]);
//! assert!(timers.get(1).unwrap().alarming());
//! ```

use std::time::Duration;
use tracing::info;

/// A single countdown.
///
/// The fields are private so the lifecycle invariants hold: `remaining`
/// never exceeds `duration`, a finished timer has nothing remaining and is
/// not running, and only a finished timer can be alarming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    id: u32,
    duration: Duration,
    remaining: Duration,
    running: bool,
    finished: bool,
    alarming: bool,
}

impl Timer {
    fn new(id: u32, duration: Duration) -> Self {
        Self {
            id,
            duration,
            remaining: duration,
            running: true,
            finished: false,
            alarming: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The length the timer was created with.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// True from the tick the timer finished until the alarm is dismissed.
    pub fn alarming(&self) -> bool {
        self.alarming
    }

    /// Advances the countdown by `step`. Returns `true` if this call made the
    /// timer finish.
    fn advance(&mut self, step: Duration) -> bool {
        if !self.running || self.remaining.is_zero() {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(step);
        if !self.remaining.is_zero() {
            return false;
        }

        self.running = false;
        self.finished = true;
        self.alarming = true;
        true
    }
}

/// What a countdown step changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// IDs of the timers that reached zero on this step, in display order.
    pub finished: Vec<u32>,
}

impl TickReport {
    /// Whether this step should sound the alarm.
    pub fn triggers_alarm(&self) -> bool {
        !self.finished.is_empty()
    }
}

/// The ordered set of timers.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    timers: Vec<Timer>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ID the next created timer will receive: one past the largest
    /// existing ID, or 1 when the registry is empty.
    pub fn next_id(&self) -> u32 {
        self.timers.iter().map(Timer::id).max().map_or(1, |id| id + 1)
    }

    /// Adds a running timer for an already validated, positive duration.
    pub fn create(&mut self, duration: Duration) -> &Timer {
        let id = self.next_id();
        info!(id, ?duration, "timer created");
        self.timers.push(Timer::new(id, duration));
        &self.timers[self.timers.len() - 1]
    }

    /// Sets every unfinished timer running. Finished timers never resume.
    pub fn resume_all(&mut self) {
        for timer in self.timers.iter_mut().filter(|t| !t.finished) {
            timer.running = true;
        }
    }

    /// Pauses every timer.
    pub fn pause_all(&mut self) {
        for timer in &mut self.timers {
            timer.running = false;
        }
    }

    /// Removes every timer; IDs start again from 1.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Counts every running timer down by `step`.
    pub fn tick(&mut self, step: Duration) -> TickReport {
        let mut report = TickReport::default();
        for timer in &mut self.timers {
            if timer.advance(step) {
                info!(id = timer.id, "timer finished");
                report.finished.push(timer.id);
            }
        }
        report
    }

    pub fn any_alarming(&self) -> bool {
        self.timers.iter().any(Timer::alarming)
    }

    /// Clears the alarm on every alarming timer and returns how many there were.
    pub fn dismiss_alarms(&mut self) -> usize {
        let mut dismissed = 0;
        for timer in self.timers.iter_mut().filter(|t| t.alarming) {
            timer.alarming = false;
            dismissed += 1;
        }
        dismissed
    }

    pub fn get(&self, id: u32) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Timer> {
        self.timers.iter()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Timer;
    type IntoIter = std::slice::Iter<'a, Timer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_create_starts_running() {
        let mut timers = Registry::new();
        let timer = timers.create(Duration::from_secs(3)).clone();

        assert_eq!(timer.id(), 1);
        assert_eq!(timer.duration(), Duration::from_secs(3));
        assert_eq!(timer.remaining(), timer.duration());
        assert!(timer.running());
        assert!(!timer.finished());
        assert!(!timer.alarming());
    }

    #[test]
    fn test_ids_increase_and_restart_after_clear() {
        let mut timers = Registry::new();
        assert_eq!(timers.create(SECOND).id(), 1);
        assert_eq!(timers.create(SECOND).id(), 2);
        assert_eq!(timers.create(SECOND).id(), 3);

        timers.clear();
        assert!(timers.is_empty());
        assert_eq!(timers.next_id(), 1);
        assert_eq!(timers.create(SECOND).id(), 1);
    }

    #[test]
    fn test_tick_counts_down_and_finishes() {
        let mut timers = Registry::new();
        timers.create(Duration::from_secs(3));

        assert!(!timers.tick(SECOND).triggers_alarm());
        assert!(!timers.tick(SECOND).triggers_alarm());
        assert_eq!(timers.get(1).unwrap().remaining(), SECOND);

        let report = timers.tick(SECOND);
        assert_eq!(report.finished, vec![1]);

        let timer = timers.get(1).unwrap();
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert!(!timer.running());
        assert!(timer.finished());
        assert!(timer.alarming());

        // Further ticks leave a finished timer alone.
        assert!(!timers.tick(SECOND).triggers_alarm());
    }

    #[test]
    fn test_sub_second_timer_finishes_on_first_tick() {
        let mut timers = Registry::new();
        timers.create(Duration::from_millis(500));
        assert_eq!(timers.tick(SECOND).finished, vec![1]);
        assert_eq!(timers.get(1).unwrap().remaining(), Duration::ZERO);
    }

    #[test]
    fn test_simultaneous_finish_reported_together() {
        let mut timers = Registry::new();
        timers.create(Duration::from_secs(2));
        timers.create(Duration::from_secs(2));
        timers.create(Duration::from_secs(5));

        timers.tick(SECOND);
        let report = timers.tick(SECOND);
        assert_eq!(report.finished, vec![1, 2]);
        assert!(report.triggers_alarm());
    }

    #[test]
    fn test_paused_timers_do_not_count_down() {
        let mut timers = Registry::new();
        timers.create(Duration::from_secs(5));
        timers.pause_all();
        timers.tick(SECOND);
        assert_eq!(timers.get(1).unwrap().remaining(), Duration::from_secs(5));

        timers.resume_all();
        timers.tick(SECOND);
        assert_eq!(timers.get(1).unwrap().remaining(), Duration::from_secs(4));
    }

    #[test]
    fn test_finished_timers_never_resume() {
        let mut timers = Registry::new();
        timers.create(SECOND);
        timers.create(Duration::from_secs(10));
        timers.tick(SECOND);

        for _ in 0..3 {
            timers.resume_all();
            let finished = timers.get(1).unwrap();
            assert!(finished.finished());
            assert!(!finished.running());
        }
        assert!(timers.get(2).unwrap().running());
    }

    #[test]
    fn test_dismiss_alarms() {
        let mut timers = Registry::new();
        timers.create(SECOND);
        timers.create(SECOND);
        timers.tick(SECOND);
        assert!(timers.any_alarming());

        assert_eq!(timers.dismiss_alarms(), 2);
        assert!(!timers.any_alarming());
        assert!(timers.iter().all(Timer::finished));
        assert_eq!(timers.dismiss_alarms(), 0);
    }
}
