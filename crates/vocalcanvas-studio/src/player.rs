//! Audio playback
//!
//! Preview playback shells out to whatever player the platform provides.
//! Playback is fire-and-forget; starting a new preview kills the previous
//! player process first so clips never overlap.

use std::path::{Path, PathBuf};

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use vocalcanvas_tts::{TtsError, TtsResult};

/// Seam between the studio session and actual sound output.
pub trait AudioPlayer: Send {
    /// Start playing the file, stopping any previous playback first.
    fn play(&mut self, path: &Path) -> TtsResult<()>;

    /// Stop the current playback if one is running.
    fn stop(&mut self);
}

/// Player backed by an OS playback command.
pub struct CommandPlayer {
    command: PathBuf,
    current: Option<Child>,
}

/// Playback commands tried in order.
const PLAYER_CANDIDATES: [&str; 3] = ["afplay", "paplay", "aplay"];

impl CommandPlayer {
    /// Find the first available playback command.
    pub fn detect() -> TtsResult<Self> {
        for candidate in PLAYER_CANDIDATES {
            if let Some(command) = vocalcanvas_tts_os::resolve_tool(candidate) {
                debug!(?command, "Using audio playback command");
                return Ok(Self {
                    command,
                    current: None,
                });
            }
        }
        Err(TtsError::EngineNotAvailable(format!(
            "No audio player found (tried {})",
            PLAYER_CANDIDATES.join(", ")
        )))
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&mut self, path: &Path) -> TtsResult<()> {
        self.stop();
        let child = Command::new(&self.command).arg(path).spawn()?;
        self.current = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Err(e) = child.start_kill() {
                warn!("Failed to stop previous playback: {}", e);
            }
        }
    }
}

impl Drop for CommandPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Player that records what it was asked to play. For tests and for running
/// on machines with no sound output.
#[derive(Debug, Default)]
pub struct NullPlayer {
    played: Vec<PathBuf>,
    stops: usize,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> &[PathBuf] {
        &self.played
    }

    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl AudioPlayer for NullPlayer {
    fn play(&mut self, path: &Path) -> TtsResult<()> {
        self.played.push(path.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_player_records_playback() {
        let mut player = NullPlayer::new();
        player.play(Path::new("a.wav")).unwrap();
        player.play(Path::new("b.wav")).unwrap();
        player.stop();
        assert_eq!(player.played().len(), 2);
        assert_eq!(player.stops(), 1);
    }
}
