//! The application state machine.
//!
//! [`App`] holds everything on screen: the duration input, the timers, the
//! focused control, the alarm blink flag and the alarm sound. Runtime
//! messages become [`Event`]s and are applied one at a time by
//! [`App::handle`], which returns the follow-up commands (the next tick,
//! an alarm sound, quitting).
//!
//! Key presses go through three stages, in order:
//!
//! 1. If any timer is alarming, the key dismisses every alarm and does
//!    nothing else.
//! 2. Quit and navigation keys are handled by the application.
//! 3. Anything else is an edit for the duration input, when it has focus.

mod event;
mod keymap;


pub use event::Event;
pub use keymap::AppKeyMap;

use crate::alarm::{AlarmManager, Player};
use crate::config::Config;
use crate::duration;
use crate::focus::{Focus, FocusController, Nav};
use crate::key;
use crate::textinput::{self, Model as TextInput};
use crate::tick::{self, SECOND_INTERVAL};
use crate::timer::Registry;
use crate::view;
use crate::Component;
use bubbletea_rs::{batch, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, info};

/// What the program starts with.
#[derive(Debug, Clone, Default)]
pub struct Launch {
    pub config: Config,
    /// Timers to create before the first frame.
    pub timers: Vec<Duration>,
}

static LAUNCH: OnceLock<Launch> = OnceLock::new();

/// Records the startup configuration for [`App::init`], which takes no
/// arguments. Only the first call has an effect.
pub fn set_launch(launch: Launch) {
    let _ = LAUNCH.set(launch);
}

/// The full application state.
pub struct App {
    pub(crate) input: TextInput,
    pub(crate) timers: Registry,
    pub(crate) focus: FocusController,
    pub(crate) blink: bool,
    pub(crate) alarm: AlarmManager,
    pub(crate) keys: AppKeyMap,
    /// Why the last submitted duration was rejected.
    pub(crate) hint: Option<String>,
    pub(crate) width: u16,
    pub(crate) height: u16,
    quitting: bool,
}

impl App {
    /// Creates the initial state: no timers, focus on the input.
    pub fn new(config: &Config, player: Arc<dyn Player>) -> Self {
        let mut input = textinput::new();
        input.set_placeholder(&config.input.placeholder);
        input.set_char_limit(config.input.char_limit);
        input.set_width(config.input.width);
        input.focus();

        Self {
            input,
            timers: Registry::new(),
            focus: FocusController::new(),
            blink: false,
            alarm: AlarmManager::new(player),
            keys: AppKeyMap::default(),
            hint: None,
            width: 0,
            height: 0,
            quitting: false,
        }
    }

    pub fn timers(&self) -> &Registry {
        &self.timers
    }

    pub fn focus(&self) -> Focus {
        self.focus.current()
    }

    pub fn focus_memory(&self) -> Focus {
        self.focus.memory()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn blink(&self) -> bool {
        self.blink
    }

    pub fn alarm(&self) -> &AlarmManager {
        &self.alarm
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Whether quit has been requested.
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    /// Applies one event and returns the commands it schedules.
    pub fn handle(&mut self, event: Event) -> Option<Cmd> {
        match event {
            Event::Key(key) => self.handle_key(&key),
            Event::SecondTick => Some(self.on_second_tick()),
            Event::BlinkTick => {
                self.blink = !self.blink;
                Some(tick::blink_tick())
            }
            Event::Resize { width, height } => {
                self.width = width;
                self.height = height;
                None
            }
        }
    }

    fn handle_key(&mut self, msg: &KeyMsg) -> Option<Cmd> {
        if self.timers.any_alarming() {
            let dismissed = self.timers.dismiss_alarms();
            self.alarm.cancel();
            info!(dismissed, key = %key::describe(msg), "alarm dismissed");
            return None;
        }

        if self.keys.quit.matches(msg) {
            return Some(self.quit());
        }
        if let Some(nav) = self.keys.nav(msg) {
            self.navigate(nav);
            return None;
        }
        if self.keys.select.matches(msg) {
            return self.select();
        }

        if self.focus.current() == Focus::Input && self.input.update(msg) {
            self.hint = None;
        }
        None
    }

    fn navigate(&mut self, nav: Nav) {
        let from = self.focus.current();
        let to = self.focus.navigate(nav);
        debug!(?nav, %from, %to, "focus moved");

        if to == Focus::Input {
            Component::focus(&mut self.input);
        } else {
            Component::blur(&mut self.input);
        }
    }

    fn select(&mut self) -> Option<Cmd> {
        match self.focus.current() {
            Focus::Input | Focus::Add => self.add_timer(),
            Focus::Start => {
                self.timers.resume_all();
                info!("all timers resumed");
            }
            Focus::Stop => {
                self.timers.pause_all();
                info!("all timers paused");
            }
            Focus::Reset => {
                self.alarm.cancel();
                self.timers.clear();
                info!("timers reset");
            }
            Focus::Quit => return Some(self.quit()),
        }
        None
    }

    fn add_timer(&mut self) {
        let text = self.input.value();
        match duration::parse(&text) {
            Ok(d) => {
                self.timers.create(d);
                self.input.set_value("");
                self.hint = None;
            }
            Err(e) => {
                debug!(input = %text, error = %e, "duration rejected");
                self.hint = Some(e.to_string());
            }
        }
    }

    /// Creates a timer for a duration that has already been parsed.
    /// Zero is ignored.
    pub fn add_timer_for(&mut self, d: Duration) {
        if !d.is_zero() {
            self.timers.create(d);
        }
    }

    fn on_second_tick(&mut self) -> Cmd {
        let report = self.timers.tick(SECOND_INTERVAL);
        if report.triggers_alarm() {
            return batch(vec![self.alarm.ring(), tick::second_tick()]);
        }
        tick::second_tick()
    }

    fn quit(&mut self) -> Cmd {
        self.alarm.cancel();
        self.quitting = true;
        info!("quitting");
        bubbletea_rs::quit()
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let launch = LAUNCH.get().cloned().unwrap_or_default();
        let mut app = App::new(&launch.config, launch.config.sound.player());
        for d in launch.timers {
            app.add_timer_for(d);
        }

        let cmd = batch(vec![tick::second_tick(), tick::blink_tick()]);
        (app, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Event::from_msg(&msg).and_then(|event| self.handle(event))
    }

    fn view(&self) -> String {
        view::render(self)
    }
}
