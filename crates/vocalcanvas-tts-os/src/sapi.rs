//! Windows SAPI speech backend
//!
//! Drives System.Speech through PowerShell, keeping the same shape as the
//! other backends: build a command, run it, read a WAV back. SAPI speaks
//! straight into a wave file, so no conversion step is needed.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use vocalcanvas_tts::{
    AudioClip, SpeechSynthesizer, SynthesisOptions, TtsError, TtsResult, VoiceInfo,
    DEFAULT_RATE_WPM,
};

use crate::resolve_tool;

const LOAD_SPEECH: &str = "Add-Type -AssemblyName System.Speech";

pub struct SapiEngine {
    powershell_path: PathBuf,
}

impl SapiEngine {
    /// Locate PowerShell and verify the System.Speech assembly loads.
    pub async fn detect() -> TtsResult<Self> {
        let powershell_path = resolve_tool("powershell.exe")
            .or_else(|| resolve_tool("pwsh.exe"))
            .or_else(|| resolve_tool("powershell"))
            .ok_or_else(|| {
                TtsError::EngineNotAvailable("powershell not found".to_string())
            })?;

        let output = Command::new(&powershell_path)
            .args(["-NoProfile", "-Command", LOAD_SPEECH])
            .output()
            .await?;
        if !output.status.success() {
            return Err(TtsError::EngineNotAvailable(
                "System.Speech assembly not available".to_string(),
            ));
        }

        Ok(Self { powershell_path })
    }

    async fn run_script(&self, script: &str) -> TtsResult<Vec<u8>> {
        let output = Command::new(&self.powershell_path)
            .args(["-NoProfile", "-Command", script])
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("SAPI synthesis failed: {}", stderr);
            return Err(TtsError::SynthesisFailed(format!(
                "powershell exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

/// Map words per minute onto the -10..=10 scale System.Speech uses,
/// anchored so the default rate lands at 0.
pub(crate) fn wpm_to_sapi_rate(rate_wpm: u32) -> i32 {
    ((rate_wpm as i32 - DEFAULT_RATE_WPM as i32) / 20).clamp(-10, 10)
}

/// Escape a value for a single-quoted PowerShell string literal.
pub(crate) fn ps_quote(value: &str) -> String {
    value.replace('\'', "''")
}

/// Parse `Name|Culture` lines emitted by the voice-listing script.
pub(crate) fn parse_sapi_voices(output: &str) -> Vec<VoiceInfo> {
    let mut voices = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once('|') {
            Some((name, culture)) => {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let culture = culture.trim();
                voices.push(VoiceInfo {
                    id: name.to_string(),
                    name: name.to_string(),
                    language: (!culture.is_empty()).then(|| culture.to_string()),
                });
            }
            None => voices.push(VoiceInfo::new(line)),
        }
    }
    voices
}

#[async_trait]
impl SpeechSynthesizer for SapiEngine {
    fn name(&self) -> &str {
        "sapi"
    }

    async fn is_available(&self) -> bool {
        Command::new(&self.powershell_path)
            .args(["-NoProfile", "-Command", LOAD_SPEECH])
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> TtsResult<AudioClip> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsError::InvalidInput("Empty text input".to_string()));
        }

        let wav = tempfile::Builder::new()
            .prefix("vocalcanvas_")
            .suffix(".wav")
            .tempfile()?;
        let wav_path = wav.path().display().to_string();

        let rate = options.rate_wpm.unwrap_or(DEFAULT_RATE_WPM);
        let mut script = format!(
            "{LOAD_SPEECH}; \
             $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; "
        );
        if let Some(voice) = &options.voice {
            script.push_str(&format!("$s.SelectVoice('{}'); ", ps_quote(voice)));
        }
        script.push_str(&format!(
            "$s.Rate = {}; \
             $s.SetOutputToWaveFile('{}'); \
             $s.Speak('{}'); \
             $s.Dispose()",
            wpm_to_sapi_rate(rate),
            ps_quote(&wav_path),
            ps_quote(text)
        ));

        debug!(rate, voice = ?options.voice, "Running SAPI synthesis");
        self.run_script(&script).await?;

        let wav_bytes = tokio::fs::read(wav.path()).await?;
        AudioClip::from_wav_bytes(wav_bytes)
            .ok_or_else(|| TtsError::ConversionFailed("SAPI produced no WAV data".to_string()))
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        let script = format!(
            "{LOAD_SPEECH}; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).GetInstalledVoices() | \
             ForEach-Object {{ $_.VoiceInfo.Name + '|' + $_.VoiceInfo.Culture }}"
        );
        let stdout = self.run_script(&script).await?;

        let voices = parse_sapi_voices(&String::from_utf8_lossy(&stdout));
        debug!("Loaded {} SAPI voices", voices.len());
        Ok(voices)
    }
}
