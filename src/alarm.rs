//! Alarm sound lifecycle.
//!
//! When timers finish, the [`AlarmManager`] starts one background sound task
//! bound to a fresh [`AlarmHandle`]. Starting a new alarm cancels the one
//! already playing, so at most one sound task is ever active. Cancelling is
//! always safe: on a handle that already fired, on a finished task, or when
//! nothing is playing at all.
//!
//! The sound itself comes from a [`Player`]. [`SystemPlayer`] runs an
//! external program (`paplay` by default) on the first sound file it finds;
//! when that fails, the terminal bell is rung instead.

use bubbletea_rs::Cmd;
use std::fmt;
use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Sound files probed by [`SystemPlayer`], in order.
pub const DEFAULT_SOUND_FILES: [&str; 2] = [
    "/usr/share/sounds/freedesktop/stereo/alarm-clock-elapsed.oga",
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
];

/// Program [`SystemPlayer`] uses to play a sound file.
pub const DEFAULT_PLAYER: &str = "paplay";

/// Why a sound could not be played.
#[derive(Debug)]
pub enum AlarmError {
    /// None of the configured sound files exist.
    NoSoundFile,
    /// The player program could not be started or waited on.
    Launch {
        program: String,
        source: io::Error,
    },
}

impl fmt::Display for AlarmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmError::NoSoundFile => write!(f, "no alarm sound file found"),
            AlarmError::Launch { program, source } => {
                write!(f, "failed to run {program}: {source}")
            }
        }
    }
}

impl std::error::Error for AlarmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AlarmError::NoSoundFile => None,
            AlarmError::Launch { source, .. } => Some(source),
        }
    }
}

/// Future returned by [`Player::play`].
pub type PlayFuture = Pin<Box<dyn Future<Output = Result<(), AlarmError>> + Send>>;

/// Something that can make an alarm noise.
pub trait Player: Send + Sync + 'static {
    /// Plays the alarm once. The future must finish promptly after `cancel`
    /// fires, and nothing may remain audible afterwards.
    fn play(&self, cancel: CancellationToken) -> PlayFuture;

    /// Fallback used when [`play`](Player::play) fails.
    fn bell(&self) {
        ring_bell();
    }
}

/// Writes the BEL control character to the terminal.
pub fn ring_bell() {
    let mut out = io::stdout();
    // Nothing sensible to do if the terminal is gone.
    let _ = out.write_all(b"\x07").and_then(|_| out.flush());
}

/// Plays a sound file through an external program.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    program: String,
    files: Vec<PathBuf>,
}

impl Default for SystemPlayer {
    fn default() -> Self {
        Self::new(
            DEFAULT_PLAYER,
            DEFAULT_SOUND_FILES.iter().map(PathBuf::from).collect(),
        )
    }
}

impl SystemPlayer {
    pub fn new(program: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            program: program.into(),
            files,
        }
    }
}

impl Player for SystemPlayer {
    fn play(&self, cancel: CancellationToken) -> PlayFuture {
        let program = self.program.clone();
        let files = self.files.clone();

        Box::pin(async move {
            let file = files
                .into_iter()
                .find(|f| f.exists())
                .ok_or(AlarmError::NoSoundFile)?;

            debug!(%program, file = %file.display(), "playing alarm sound");
            let mut child = Command::new(&program)
                .arg(&file)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| AlarmError::Launch {
                    program: program.clone(),
                    source,
                })?;

            tokio::select! {
                _ = cancel.cancelled() => {
                    // The child may already have exited on its own.
                    let _ = child.kill().await;
                    Ok(())
                }
                status = child.wait() => {
                    // A player that ran but exited non-zero still made its attempt.
                    status.map(|_| ()).map_err(|source| AlarmError::Launch { program, source })
                }
            }
        })
    }
}

/// Rings the terminal bell and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellPlayer;

impl Player for BellPlayer {
    fn play(&self, _cancel: CancellationToken) -> PlayFuture {
        ring_bell();
        Box::pin(async { Ok(()) })
    }
}

/// Makes no sound; the alarm is visual only.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl Player for SilentPlayer {
    fn play(&self, _cancel: CancellationToken) -> PlayFuture {
        Box::pin(async { Ok(()) })
    }

    fn bell(&self) {}
}

/// Cancellation handle for one alarm sound task.
///
/// Clones share the same underlying signal. [`cancel`](AlarmHandle::cancel)
/// may be called any number of times.
#[derive(Debug, Clone, Default)]
pub struct AlarmHandle {
    token: CancellationToken,
}

impl AlarmHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token the sound task watches.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Owns the in-flight alarm sound, if any.
pub struct AlarmManager {
    player: Arc<dyn Player>,
    active: Option<AlarmHandle>,
    started: u64,
}

impl fmt::Debug for AlarmManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlarmManager")
            .field("active", &self.active)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl AlarmManager {
    pub fn new(player: Arc<dyn Player>) -> Self {
        Self {
            player,
            active: None,
            started: 0,
        }
    }

    /// Starts a new alarm sound, cancelling any that is still playing.
    ///
    /// The returned command spawns the sound task when the runtime executes
    /// it and yields no message; the task never touches application state.
    pub fn ring(&mut self) -> Cmd {
        self.cancel();

        self.started += 1;
        let id = self.started;
        let handle = AlarmHandle::new();
        let token = handle.token();
        self.active = Some(handle);
        info!(id, "alarm started");

        let player = Arc::clone(&self.player);
        Box::pin(async move {
            tokio::spawn(play_alarm(player, token, id));
            None
        })
    }

    /// Cancels the in-flight sound. A no-op when nothing is playing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_cancelled() {
                info!(id = self.started, "alarm cancelled");
            }
            handle.cancel();
        }
    }

    /// Whether a sound task has been started and not cancelled.
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    /// A clone of the current handle.
    pub fn handle(&self) -> Option<AlarmHandle> {
        self.active.clone()
    }

    /// How many alarms have been started since launch.
    pub fn started(&self) -> u64 {
        self.started
    }
}

async fn play_alarm(player: Arc<dyn Player>, cancel: CancellationToken, id: u64) {
    if cancel.is_cancelled() {
        return;
    }

    match player.play(cancel.clone()).await {
        Ok(()) => debug!(id, "alarm sound done"),
        Err(_) if cancel.is_cancelled() => {}
        Err(e) => {
            warn!(id, error = %e, "alarm sound failed, ringing bell");
            player.bell();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct FakePlayer {
        fail: bool,
        plays: AtomicUsize,
        stopped: AtomicUsize,
        bells: AtomicUsize,
    }

    impl FakePlayer {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl Player for Arc<FakePlayer> {
        fn play(&self, cancel: CancellationToken) -> PlayFuture {
            let me = Arc::clone(self);
            Box::pin(async move {
                me.plays.fetch_add(1, Ordering::SeqCst);
                if me.fail {
                    return Err(AlarmError::NoSoundFile);
                }
                cancel.cancelled().await;
                me.stopped.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
        }

        fn bell(&self) {
            self.bells.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn wait_until(cond: impl Fn() -> bool) {
        for _ in 0..200 {
            if cond() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    fn manager(player: &Arc<FakePlayer>) -> AlarmManager {
        AlarmManager::new(Arc::new(Arc::clone(player)))
    }

    #[test]
    fn test_handle_cancel_is_idempotent() {
        let handle = AlarmHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        clone.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancel_without_alarm_is_noop() {
        let player = Arc::new(FakePlayer::default());
        let mut alarm = manager(&player);
        alarm.cancel();
        alarm.cancel();
        assert!(!alarm.is_active());
        assert_eq!(alarm.started(), 0);
    }

    #[tokio::test]
    async fn test_ring_plays_until_cancelled() {
        let player = Arc::new(FakePlayer::default());
        let mut alarm = manager(&player);

        let cmd = alarm.ring();
        assert!(alarm.is_active());
        assert!(cmd.await.is_none());
        wait_until(|| player.plays.load(Ordering::SeqCst) == 1).await;

        alarm.cancel();
        assert!(!alarm.is_active());
        wait_until(|| player.stopped.load(Ordering::SeqCst) == 1).await;

        alarm.cancel();
        assert_eq!(player.bells.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_new_ring_cancels_previous() {
        let player = Arc::new(FakePlayer::default());
        let mut alarm = manager(&player);

        alarm.ring().await;
        let first = alarm.handle().unwrap();
        wait_until(|| player.plays.load(Ordering::SeqCst) == 1).await;

        alarm.ring().await;
        assert!(first.is_cancelled());
        assert!(alarm.is_active());
        assert_eq!(alarm.started(), 2);
        wait_until(|| player.stopped.load(Ordering::SeqCst) == 1).await;
        wait_until(|| player.plays.load(Ordering::SeqCst) == 2).await;

        alarm.cancel();
        wait_until(|| player.stopped.load(Ordering::SeqCst) == 2).await;
    }

    #[tokio::test]
    async fn test_failed_playback_rings_bell() {
        let player = Arc::new(FakePlayer::failing());
        let mut alarm = manager(&player);

        alarm.ring().await;
        wait_until(|| player.bells.load(Ordering::SeqCst) == 1).await;
        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_spawn_never_plays() {
        let player = Arc::new(FakePlayer::default());
        let mut alarm = manager(&player);

        let cmd = alarm.ring();
        alarm.cancel();
        cmd.await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_system_player_without_files_fails() {
        let player = SystemPlayer::new("paplay", vec![PathBuf::from("/nonexistent/alarm.oga")]);
        let result = player.play(CancellationToken::new()).await;
        assert!(matches!(result, Err(AlarmError::NoSoundFile)));
    }

    #[tokio::test]
    async fn test_system_player_launch_failure() {
        let file = std::env::temp_dir().join("bubbletea-countdown-test.oga");
        std::fs::write(&file, b"").unwrap();
        let player = SystemPlayer::new("/nonexistent/player-program", vec![file.clone()]);
        let result = player.play(CancellationToken::new()).await;
        let _ = std::fs::remove_file(&file);
        assert!(matches!(result, Err(AlarmError::Launch { .. })));
    }
}
