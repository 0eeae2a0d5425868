//! Rendering of the application state.
//!
//! [`render`] is a pure function of [`App`]: the same state always draws
//! the same text. The layout is
//!
//! ```text
//! New Timer: > 10s (e.g. 5m, 1h30m)
//!
//! #1: 4m59s remaining
//! #2: Time's Up!
//!
//! [ Add ]  [ Start ]  [ Stop ]  [ Reset ]  [ Quit ]
//!
//! tab navigate • enter select • q quit
//! ```
//!
//! centered in the terminal once its size is known.

use crate::app::App;
use crate::duration::format_duration;
use crate::focus::Focus;
use crate::key::KeyMap;
use crate::timer::Timer;
use lipgloss_extras::lipgloss::{self, CENTER};
use lipgloss_extras::prelude::*;

fn focused_style() -> Style {
    Style::new().foreground(Color::from("205"))
}

fn blurred_style() -> Style {
    Style::new().foreground(Color::from("240"))
}

fn alarm_style() -> Style {
    Style::new().foreground(Color::from("196")).bold(true)
}

/// Draws the whole screen.
pub fn render(app: &App) -> String {
    let mut s = String::new();

    s.push_str("New Timer: ");
    s.push_str(&app.input().view());
    s.push('\n');
    if let Some(hint) = app.hint() {
        s.push_str(&blurred_style().render(hint));
        s.push('\n');
    }
    s.push('\n');

    if app.timers().is_empty() {
        s.push_str(&blurred_style().render("No timers running"));
        s.push_str("\n\n");
    } else {
        for timer in app.timers() {
            s.push_str(&timer_line(timer, app.blink()));
            s.push('\n');
        }
        s.push('\n');
    }

    let buttons: Vec<String> = Focus::BUTTONS
        .iter()
        .map(|&b| button(b, app.focus() == b))
        .collect();
    s.push_str(&buttons.join("  "));
    s.push_str("\n\n");

    s.push_str(&blurred_style().render(&help_line(app)));

    place_center(app.width, app.height, &s)
}

fn timer_line(timer: &Timer, blink: bool) -> String {
    let prefix = format!("#{}: ", timer.id());
    if timer.finished() {
        let msg = "Time's Up!";
        if timer.alarming() && blink {
            return prefix + &alarm_style().render(msg);
        }
        return prefix + msg;
    }

    let status = if timer.running() { "" } else { " (Paused)" };
    format!("{prefix}{} remaining{status}", format_duration(timer.remaining()))
}

fn button(focus: Focus, focused: bool) -> String {
    let label = focus.label().unwrap_or_default();
    if focused {
        focused_style().render(&format!("[ {label} ]"))
    } else {
        format!("[ {} ]", blurred_style().render(label))
    }
}

fn help_line(app: &App) -> String {
    app.keys
        .short_help()
        .into_iter()
        .filter(|b| b.enabled())
        .map(|b| format!("{} {}", b.help().key, b.help().desc))
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Centers the screen in the terminal. A zero size (no resize seen yet)
/// leaves the text as is.
fn place_center(width: u16, height: u16, s: &str) -> String {
    if width == 0 || height == 0 {
        return s.to_string();
    }
    lipgloss::place(width.into(), height.into(), CENTER, CENTER, s, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::SilentPlayer;
    use crate::app::Event;
    use crate::config::Config;
    use bubbletea_rs::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;

    fn plain(s: String) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn app() -> App {
        App::new(&Config::default(), Arc::new(SilentPlayer))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle(Event::Key(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }));
    }

    #[test]
    fn test_initial_screen() {
        let view = plain(render(&app()));
        assert!(view.starts_with("New Timer: > 10s (e.g. 5m, 1h30m)\n"));
        assert!(view.contains("No timers running"));
        assert!(view.contains("[ Add ]  [ Start ]  [ Stop ]  [ Reset ]  [ Quit ]"));
        assert!(view.ends_with("tab navigate • enter select • q quit"));
    }

    #[test]
    fn test_timer_lines() {
        let mut app = app();
        app.add_timer_for(Duration::from_secs(90));
        app.add_timer_for(Duration::from_secs(1));
        app.handle(Event::SecondTick);

        let view = plain(render(&app));
        assert!(view.contains("#1: 1m29s remaining\n"));
        assert!(view.contains("#2: Time's Up!\n"));
        assert!(!view.contains("No timers running"));
    }

    #[test]
    fn test_paused_timer_line() {
        let mut app = app();
        app.add_timer_for(Duration::from_secs(5));
        app.timers.pause_all();
        assert!(plain(render(&app)).contains("#1: 5s remaining (Paused)"));
    }

    #[test]
    fn test_alarm_text_stable_across_blink() {
        let mut app = app();
        app.add_timer_for(Duration::from_secs(1));
        app.handle(Event::SecondTick);

        app.blink = true;
        let on = render(&app);
        app.blink = false;
        let off = render(&app);

        assert!(plain(on.clone()).contains("#1: Time's Up!"));
        assert_eq!(plain(on), plain(off));
    }

    #[test]
    fn test_rejected_input_shows_hint() {
        let mut app = app();
        app.input_mut().set_value("abc");
        press(&mut app, KeyCode::Enter);
        assert!(plain(render(&app)).contains("invalid duration \"abc\""));
    }

    #[test]
    fn test_render_is_pure() {
        let mut app = app();
        app.add_timer_for(Duration::from_secs(30));
        assert_eq!(render(&app), render(&app));
    }

    #[test]
    fn test_place_center() {
        assert_eq!(place_center(0, 0, "ab\ncd"), "ab\ncd");
        assert_eq!(place_center(2, 1, "abcd"), "abcd");

        let placed = plain(place_center(6, 4, "ab\ncd"));
        let lines: Vec<&str> = placed.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 6));
        assert!(lines.contains(&"  ab  "));
        assert!(lines.contains(&"  cd  "));
    }

    #[test]
    fn test_screen_centered_after_resize() {
        let mut app = app();
        app.handle(Event::Resize {
            width: 100,
            height: 30,
        });
        let view = plain(render(&app));
        assert_eq!(view.split('\n').count(), 30);
        let buttons = view
            .lines()
            .find(|l| l.contains("[ Add ]"))
            .unwrap();
        assert!(buttons.starts_with("   "));
    }
}
