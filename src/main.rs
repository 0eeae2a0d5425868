use anyhow::{Context, Result};
use bubbletea_countdown::app::{self, App, Launch};
use bubbletea_countdown::config::{Config, SoundMode};
use bubbletea_countdown::duration;
use bubbletea_rs::Program;
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run several countdown timers in the terminal.
#[derive(Debug, Parser)]
#[command(name = "countdown", version)]
struct Args {
    /// Configuration file (default: ~/.config/countdown/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not play a sound when a timer finishes
    #[arg(long)]
    no_sound: bool,

    /// Timers to start right away, e.g. `5m 1h30m`
    #[arg(value_name = "DURATION")]
    durations: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("loading config")?;
    if args.log_file.is_some() {
        config.log.file = args.log_file;
    }
    if args.no_sound {
        config.sound.mode = SoundMode::Off;
    }

    init_logging(&config).context("setting up logging")?;

    let timers = args
        .durations
        .iter()
        .map(|text| duration::parse(text).with_context(|| format!("timer {text:?}")))
        .collect::<Result<Vec<_>>>()?;
    info!(timers = timers.len(), sound = ?config.sound.mode, "countdown starting");

    app::set_launch(Launch { config, timers });

    let program = Program::<App>::builder()
        .alt_screen(true)
        .build()
        .map_err(|e| anyhow::anyhow!("starting terminal program: {e}"))?;
    program
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("running terminal program: {e}"))?;

    info!("countdown exited");
    Ok(())
}

/// The UI owns the terminal, so logs only go to a file. Without one they
/// are discarded.
fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    match &config.log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| path.display().to_string())?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init()
                .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logging_init_is_an_error() {
        let config = Config::default();
        let _ = init_logging(&config);
        let err = init_logging(&config).unwrap_err();
        assert!(format!("{err:#}").contains("installing log subscriber"));
    }
}
