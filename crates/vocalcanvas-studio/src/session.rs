//! Studio session
//!
//! Holds what the user is working on (text, voice, rate) and performs the
//! two real actions: preview through the audio player and export to a
//! user-chosen WAV path. Every failure is an error value; the session stays
//! usable afterward.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use vocalcanvas_tts::{
    validate_rate, SpeechSynthesizer, SynthesisOptions, TtsError, VoiceRegistry, DEFAULT_RATE_WPM,
};

use crate::controller::{ControllerError, DemoController, Phase};
use crate::player::AudioPlayer;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Tts(#[from] TtsError),

    #[error("Unknown voice: {0}")]
    UnknownVoice(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct StudioSession {
    engine: Arc<dyn SpeechSynthesizer>,
    registry: Arc<VoiceRegistry>,
    player: Box<dyn AudioPlayer>,
    controller: DemoController,
    text: String,
    voice: Option<String>,
    rate: u32,
    // Keeps the preview file alive while the player process reads it.
    preview_file: Option<tempfile::NamedTempFile>,
}

impl StudioSession {
    pub fn new(
        engine: Arc<dyn SpeechSynthesizer>,
        registry: Arc<VoiceRegistry>,
        player: Box<dyn AudioPlayer>,
        text_limit: usize,
    ) -> Self {
        let voice = registry.default_voice().map(|v| v.id.clone());
        Self {
            engine,
            registry,
            player,
            controller: DemoController::new(text_limit),
            text: String::new(),
            voice,
            rate: DEFAULT_RATE_WPM,
            preview_file: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    pub fn controller(&self) -> &DemoController {
        &self.controller
    }

    pub fn voices(&self) -> &VoiceRegistry {
        &self.registry
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.controller.text_changed(&self.text);
    }

    /// Select a voice. Must name one the registry knows.
    pub fn set_voice(&mut self, voice: &str) -> Result<(), StudioError> {
        if !self.registry.contains(voice) {
            return Err(StudioError::UnknownVoice(voice.to_string()));
        }
        self.voice = Some(voice.to_string());
        Ok(())
    }

    /// Set the speaking rate, bounds-checked.
    pub fn set_rate(&mut self, rate_wpm: u32) -> Result<(), StudioError> {
        self.rate = validate_rate(rate_wpm)?;
        Ok(())
    }

    /// Synthesize the current text and play it.
    pub async fn preview(&mut self) -> Result<(), StudioError> {
        let clip = self.generate().await?;

        let file = tempfile::Builder::new()
            .prefix("vocalcanvas_preview_")
            .suffix(".wav")
            .tempfile()?;
        tokio::fs::write(file.path(), &clip).await?;

        self.player.play(file.path())?;
        // Dropping the previous preview file also deletes it.
        self.preview_file = Some(file);
        info!(rate = self.rate, voice = ?self.voice, "Playing preview");
        Ok(())
    }

    /// Synthesize the current text and write it to `path`.
    pub async fn export(&mut self, path: &Path) -> Result<PathBuf, StudioError> {
        let clip = self.generate().await?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, &clip).await?;
        info!(?path, bytes = clip.len(), "Exported audio");
        Ok(path.to_path_buf())
    }

    /// Stop any preview that is still playing.
    pub fn stop(&mut self) {
        self.player.stop();
    }

    /// Run one synthesis through the controller's generate cycle.
    async fn generate(&mut self) -> Result<Vec<u8>, StudioError> {
        self.controller.begin_generate()?;

        let mut options = SynthesisOptions::default().with_rate(self.rate);
        if let Some(voice) = &self.voice {
            options = options.with_voice(voice.clone());
        }

        match self.engine.synthesize(self.text.trim(), &options).await {
            Ok(clip) => {
                let label = format!("{} chars as WAV", self.controller.character_count());
                // begin_generate just put us in Loading, so finish cannot fail.
                let _ = self.controller.finish(Ok(label));
                Ok(clip.wav_bytes)
            }
            Err(e) => {
                let _ = self.controller.finish(Err(e.to_string()));
                Err(e.into())
            }
        }
    }
}

/// Convenience for status lines in the command loop.
pub fn phase_label(phase: &Phase) -> String {
    match phase {
        Phase::Idle => "idle".to_string(),
        Phase::Loading => "generating...".to_string(),
        Phase::Result(label) => format!("done: {label}"),
        Phase::Error(message) => format!("error: {message}"),
    }
}
