//! eSpeak speech backend
//!
//! `espeak --stdout` writes a complete WAV file to stdout, so no conversion
//! step is needed. Both the classic `espeak` and the `espeak-ng` fork are
//! supported; whichever answers `--version` first wins.

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, error};

use vocalcanvas_tts::{
    AudioClip, SpeechSynthesizer, SynthesisOptions, TtsError, TtsResult, VoiceInfo,
    DEFAULT_RATE_WPM,
};

pub struct EspeakEngine {
    command: String,
}

impl EspeakEngine {
    /// Probe for `espeak` or `espeak-ng`, failing if neither runs.
    pub async fn detect() -> TtsResult<Self> {
        for candidate in ["espeak", "espeak-ng"] {
            if Command::new(candidate)
                .arg("--version")
                .output()
                .await
                .is_ok()
            {
                return Ok(Self {
                    command: candidate.to_string(),
                });
            }
        }
        Err(TtsError::EngineNotAvailable(
            "espeak not found. Please install espeak or espeak-ng.".to_string(),
        ))
    }
}

/// Parse `espeak --voices` output.
///
/// Line format: Pty Language Age/Gender VoiceName File Other
/// Example: `5  en             M  en                 (en 2)`
pub(crate) fn parse_espeak_voices(output: &str) -> Vec<VoiceInfo> {
    let voice_regex = Regex::new(r"^\s*(\d+)\s+([\w-]+)\s+([MF\+]?)\s+([\w\-_]+)\s+").unwrap();
    let mut voices = Vec::new();

    for line in output.lines().skip(1) {
        if let Some(captures) = voice_regex.captures(line) {
            let language = captures[2].to_string();
            let voice_id = captures[4].to_string();
            voices.push(VoiceInfo {
                id: voice_id.clone(),
                name: format!("{} ({})", language, voice_id),
                language: Some(language),
            });
        }
    }

    voices
}

#[async_trait]
impl SpeechSynthesizer for EspeakEngine {
    fn name(&self) -> &str {
        "espeak"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .await
            .is_ok()
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> TtsResult<AudioClip> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsError::InvalidInput("Empty text input".to_string()));
        }

        let rate = options.rate_wpm.unwrap_or(DEFAULT_RATE_WPM);
        let mut cmd = Command::new(&self.command);
        cmd.arg("--stdout");
        if let Some(voice) = &options.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("-s").arg(rate.to_string()).arg(text);

        debug!(rate, voice = ?options.voice, "Running espeak synthesis");
        let output = cmd.output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("espeak synthesis failed: {}", stderr);
            return Err(TtsError::SynthesisFailed(format!(
                "espeak exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(TtsError::SynthesisFailed(
                "No audio data generated".to_string(),
            ));
        }

        AudioClip::from_wav_bytes(output.stdout)
            .ok_or_else(|| TtsError::ConversionFailed("espeak produced no WAV data".to_string()))
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        let output = Command::new(&self.command).arg("--voices").output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TtsError::SynthesisFailed(format!(
                "espeak --voices exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let voices = parse_espeak_voices(&String::from_utf8_lossy(&output.stdout));
        debug!("Loaded {} espeak voices", voices.len());
        Ok(voices)
    }
}
