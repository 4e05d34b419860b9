//! macOS `say` speech backend
//!
//! `say` writes AIFF, so every synthesis runs a two-step pipeline: render to
//! a temporary .aiff, then convert to 16-bit little-endian WAV with
//! `afconvert`. Both commands ship with macOS.

use std::path::PathBuf;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, error};

use vocalcanvas_tts::{
    AudioClip, SpeechSynthesizer, SynthesisOptions, TtsError, TtsResult, VoiceInfo,
    DEFAULT_RATE_WPM,
};

use crate::resolve_tool;

pub struct SayEngine {
    say_path: PathBuf,
    afconvert_path: PathBuf,
}

impl SayEngine {
    /// Locate `say` and `afconvert`, failing if either is missing.
    pub fn discover() -> TtsResult<Self> {
        let say_path = resolve_tool("say").ok_or_else(|| {
            TtsError::EngineNotAvailable("say command not found".to_string())
        })?;
        let afconvert_path = resolve_tool("afconvert").ok_or_else(|| {
            TtsError::EngineNotAvailable("afconvert command not found".to_string())
        })?;
        Ok(Self {
            say_path,
            afconvert_path,
        })
    }
}

/// Parse `say -v ?` output into voices.
///
/// Each line is `Name     locale    # sample sentence`, where the name can
/// contain spaces ("Bad News"). Lines without a `#` comment are split on
/// runs of whitespace instead, keeping everything but the last token as the
/// name.
pub(crate) fn parse_say_voices(output: &str) -> Vec<VoiceInfo> {
    let line_regex = Regex::new(r"^(.*?)\s{2,}(\S+)\s+#").unwrap();
    let mut voices = Vec::new();

    for line in output.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        if let Some(captures) = line_regex.captures(line) {
            let name = captures[1].trim().to_string();
            let locale = captures[2].to_string();
            if !name.is_empty() {
                voices.push(VoiceInfo {
                    id: name.clone(),
                    name,
                    language: Some(locale),
                });
            }
            continue;
        }

        // Fallback for lines with no sample sentence.
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2 {
            let name = tokens[..tokens.len() - 1].join(" ");
            voices.push(VoiceInfo {
                id: name.clone(),
                name,
                language: Some(tokens[tokens.len() - 1].to_string()),
            });
        } else if tokens.len() == 1 {
            voices.push(VoiceInfo::new(tokens[0]));
        }
    }

    voices
}

#[async_trait]
impl SpeechSynthesizer for SayEngine {
    fn name(&self) -> &str {
        "say"
    }

    async fn is_available(&self) -> bool {
        self.say_path.is_file() && self.afconvert_path.is_file()
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> TtsResult<AudioClip> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsError::InvalidInput("Empty text input".to_string()));
        }

        let aiff = tempfile::Builder::new()
            .prefix("vocalcanvas_")
            .suffix(".aiff")
            .tempfile()?;
        let wav = tempfile::Builder::new()
            .prefix("vocalcanvas_")
            .suffix(".wav")
            .tempfile()?;

        let rate = options.rate_wpm.unwrap_or(DEFAULT_RATE_WPM);
        let mut cmd = Command::new(&self.say_path);
        if let Some(voice) = &options.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("-r")
            .arg(rate.to_string())
            .arg(text)
            .arg("-o")
            .arg(aiff.path());

        debug!(rate, voice = ?options.voice, "Running say synthesis");
        let output = cmd.output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("say synthesis failed: {}", stderr);
            return Err(TtsError::SynthesisFailed(format!(
                "say exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // afconvert <in.aiff> <out.wav> -f WAVE -d LEI16
        let output = Command::new(&self.afconvert_path)
            .arg(aiff.path())
            .arg(wav.path())
            .arg("-f")
            .arg("WAVE")
            .arg("-d")
            .arg("LEI16")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("afconvert failed: {}", stderr);
            return Err(TtsError::ConversionFailed(format!(
                "afconvert exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let wav_bytes = tokio::fs::read(wav.path()).await?;
        AudioClip::from_wav_bytes(wav_bytes)
            .ok_or_else(|| TtsError::ConversionFailed("afconvert produced no WAV data".to_string()))
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        let output = Command::new(&self.say_path)
            .arg("-v")
            .arg("?")
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TtsError::SynthesisFailed(format!(
                "say -v ? exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let voices = parse_say_voices(&String::from_utf8_lossy(&output.stdout));
        debug!("Loaded {} say voices", voices.len());
        Ok(voices)
    }
}
