//! Core types for speech synthesis

use serde::{Deserialize, Serialize};

/// Slowest speaking rate accepted anywhere in the system, in words per minute.
pub const MIN_RATE_WPM: u32 = 80;
/// Fastest speaking rate accepted anywhere in the system.
pub const MAX_RATE_WPM: u32 = 400;
/// Rate used when a request or session does not specify one.
pub const DEFAULT_RATE_WPM: u32 = 170;

/// A single synthesized audio result.
///
/// `wav_bytes` is a complete RIFF/WAVE file as produced by the external
/// capability; sample rate and channel count are read back from its header.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub wav_bytes: Vec<u8>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioClip {
    /// Build a clip from raw WAV bytes, reading format fields from the header.
    pub fn from_wav_bytes(wav_bytes: Vec<u8>) -> Option<Self> {
        let (sample_rate, channels) = wav_header_format(&wav_bytes)?;
        Some(Self {
            wav_bytes,
            sample_rate,
            channels,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.wav_bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.wav_bytes.len()
    }
}

/// Read `(sample_rate, channels)` out of a RIFF/WAVE header.
///
/// The standard fmt chunk places channels at byte 22 and sample rate at
/// byte 24, both little-endian. Returns `None` for anything that is not a
/// plausible WAV file.
fn wav_header_format(bytes: &[u8]) -> Option<(u32, u16)> {
    if bytes.len() < 44 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return None;
    }
    let channels = u16::from_le_bytes([bytes[22], bytes[23]]);
    let sample_rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
    if channels == 0 || sample_rate == 0 {
        return None;
    }
    Some((sample_rate, channels))
}

/// Options for individual synthesis requests
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    /// Voice identifier; the engine's own default applies when absent.
    pub voice: Option<String>,
    /// Speaking rate in words per minute.
    pub rate_wpm: Option<u32>,
}

impl SynthesisOptions {
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_rate(mut self, rate_wpm: u32) -> Self {
        self.rate_wpm = Some(rate_wpm);
        self
    }
}

/// A selectable OS-provided voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Identifier passed back to the speech command.
    pub id: String,
    /// Human-readable voice name.
    pub name: String,
    /// Language code when the platform reports one (e.g. "en_US").
    pub language: Option<String>,
}

impl VoiceInfo {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            language: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_wav(sample_rate: u32, channels: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let cursor = std::io::Cursor::new(&mut bytes);
            let spec = hound::WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            let mut writer = hound::WavWriter::new(cursor, spec).unwrap();
            for _ in 0..64 {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        bytes
    }

    #[test]
    fn clip_reads_format_from_header() {
        let clip = AudioClip::from_wav_bytes(tiny_wav(22_050, 1)).unwrap();
        assert_eq!(clip.sample_rate, 22_050);
        assert_eq!(clip.channels, 1);
        assert!(!clip.is_empty());
    }

    #[test]
    fn garbage_bytes_are_not_a_clip() {
        assert!(AudioClip::from_wav_bytes(vec![0u8; 16]).is_none());
        assert!(AudioClip::from_wav_bytes(b"not a wav file at all ...".to_vec()).is_none());
    }
}
