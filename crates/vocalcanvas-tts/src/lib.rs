//! Speech synthesis abstraction layer for Vocal Canvas
//!
//! This crate provides the foundational types and traits for turning short
//! text into WAV audio through an operating-system speech capability: the
//! synthesizer trait, voice bookkeeping, and collision-resistant artifact
//! naming. Concrete command-backed engines live in `vocalcanvas-tts-os`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod engine;
pub mod error;
pub mod mock;
pub mod types;
pub mod voices;

pub use engine::SpeechSynthesizer;
pub use error::{TtsError, TtsResult};
pub use mock::MockSynthesizer;
pub use types::{
    AudioClip, SynthesisOptions, VoiceInfo, DEFAULT_RATE_WPM, MAX_RATE_WPM, MIN_RATE_WPM,
};
pub use voices::VoiceRegistry;

/// Generates unique artifact sequence numbers
static ARTIFACT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a collision-resistant artifact identifier.
///
/// Combines the current Unix timestamp, a process-wide monotonic counter, and
/// a random token so that concurrent requests never race on a shared name.
pub fn next_artifact_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let seq = ARTIFACT_COUNTER.fetch_add(1, Ordering::SeqCst);
    let token: u32 = rand::random();
    format!("{secs}_{seq}_{token:08x}")
}

/// Validate a speaking rate against the supported range.
pub fn validate_rate(rate_wpm: u32) -> TtsResult<u32> {
    if (MIN_RATE_WPM..=MAX_RATE_WPM).contains(&rate_wpm) {
        Ok(rate_wpm)
    } else {
        Err(TtsError::InvalidInput(format!(
            "Rate must be between {MIN_RATE_WPM} and {MAX_RATE_WPM}, got {rate_wpm}"
        )))
    }
}
