//! User configuration, read from a TOML file.
//!
//! Every field has a default, so an empty or partial file is valid:
//!
//! ```toml
//! [input]
//! placeholder = "10s (e.g. 5m, 1h30m)"
//! char_limit = 20
//! width = 30
//!
//! [sound]
//! mode = "system"          # system | bell | off
//! player = "paplay"
//! files = ["/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga"]
//!
//! [log]
//! file = "/tmp/countdown.log"
//! level = "info"
//! ```

use crate::alarm::{self, BellPlayer, Player, SilentPlayer, SystemPlayer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_placeholder")]
    pub placeholder: String,
    #[serde(default = "InputConfig::default_char_limit")]
    pub char_limit: usize,
    #[serde(default = "InputConfig::default_width")]
    pub width: usize,
}

impl InputConfig {
    fn default_placeholder() -> String { "10s (e.g. 5m, 1h30m)".into() }
    fn default_char_limit() -> usize { 20 }
    fn default_width() -> usize { 30 }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            placeholder: Self::default_placeholder(),
            char_limit: Self::default_char_limit(),
            width: Self::default_width(),
        }
    }
}

/// How a finished timer is announced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SoundMode {
    /// Play a sound file, falling back to the terminal bell.
    #[default]
    System,
    /// Always ring the terminal bell.
    Bell,
    /// No sound; the alarm only blinks.
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoundConfig {
    #[serde(default)]
    pub mode: SoundMode,
    #[serde(default = "SoundConfig::default_player")]
    pub player: String,
    #[serde(default = "SoundConfig::default_files")]
    pub files: Vec<PathBuf>,
}

impl SoundConfig {
    fn default_player() -> String { alarm::DEFAULT_PLAYER.into() }
    fn default_files() -> Vec<PathBuf> {
        alarm::DEFAULT_SOUND_FILES.iter().map(PathBuf::from).collect()
    }

    /// Builds the player this configuration asks for.
    pub fn player(&self) -> Arc<dyn Player> {
        match self.mode {
            SoundMode::System => Arc::new(SystemPlayer::new(&self.player, self.files.clone())),
            SoundMode::Bell => Arc::new(BellPlayer),
            SoundMode::Off => Arc::new(SilentPlayer),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            mode: SoundMode::default(),
            player: Self::default_player(),
            files: Self::default_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Log destination. The terminal belongs to the UI, so without a file
    /// nothing is logged.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "LogConfig::default_level")]
    pub level: String,
}

impl LogConfig {
    fn default_level() -> String { "info".into() }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: Self::default_level(),
        }
    }
}

/// `~/.config/countdown/config.toml` (or the platform equivalent).
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("countdown").join("config.toml"))
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and defaults are used if there is no file there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
