//! Fake synthesizer for tests
//!
//! Produces a small but valid 16-bit mono WAV without touching any OS
//! command, so the server and studio can be exercised on machines with no
//! speech capability installed.

use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::engine::SpeechSynthesizer;
use crate::error::{TtsError, TtsResult};
use crate::types::{AudioClip, SynthesisOptions, VoiceInfo};

const MOCK_SAMPLE_RATE: u32 = 22_050;

pub struct MockSynthesizer {
    voices: Vec<VoiceInfo>,
    failure: Option<String>,
    synthesized: Mutex<Vec<String>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::with_voices(vec![
            VoiceInfo::new("Samantha"),
            VoiceInfo::new("Daniel"),
            VoiceInfo::new("Fred"),
        ])
    }

    pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
        Self {
            voices,
            failure: None,
            synthesized: Mutex::new(Vec::new()),
        }
    }

    /// A synthesizer whose every `synthesize` call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            voices: vec![VoiceInfo::new("Samantha")],
            failure: Some(message.into()),
            synthesized: Mutex::new(Vec::new()),
        }
    }

    /// Texts passed to `synthesize` so far, in call order.
    pub fn synthesized_texts(&self) -> Vec<String> {
        self.synthesized.lock().unwrap().clone()
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn synthesize(&self, text: &str, _options: &SynthesisOptions) -> TtsResult<AudioClip> {
        if let Some(message) = &self.failure {
            return Err(TtsError::SynthesisFailed(message.clone()));
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TtsError::InvalidInput("Empty text input".to_string()));
        }

        self.synthesized.lock().unwrap().push(trimmed.to_string());

        // 50 ms of silence per character keeps duration proportional to input.
        let samples = (MOCK_SAMPLE_RATE as usize / 20) * trimmed.chars().count().max(1);
        let mut wav_bytes = Vec::new();
        {
            let cursor = Cursor::new(&mut wav_bytes);
            let spec = hound::WavSpec {
                channels: 1,
                sample_rate: MOCK_SAMPLE_RATE,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            let mut writer = hound::WavWriter::new(cursor, spec)
                .map_err(|e| TtsError::ConversionFailed(e.to_string()))?;
            for _ in 0..samples {
                writer
                    .write_sample(0i16)
                    .map_err(|e| TtsError::ConversionFailed(e.to_string()))?;
            }
            writer
                .finalize()
                .map_err(|e| TtsError::ConversionFailed(e.to_string()))?;
        }

        Ok(AudioClip {
            wav_bytes,
            sample_rate: MOCK_SAMPLE_RATE,
            channels: 1,
        })
    }

    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>> {
        Ok(self.voices.clone())
    }
}
