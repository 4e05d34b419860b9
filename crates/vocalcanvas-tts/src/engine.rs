//! Synthesizer trait
//!
//! The one seam between this system and the operating system's speech
//! capability. Everything above it (HTTP handlers, the studio session) only
//! ever sees text in, WAV bytes out.

use async_trait::async_trait;

use crate::error::TtsResult;
use crate::types::{AudioClip, SynthesisOptions, VoiceInfo};

/// Core speech synthesis interface
///
/// Implementations marshal text, voice, and rate into an external command and
/// hand back the resulting audio. Engines take `&self` so a single instance
/// can serve concurrent requests; any per-call scratch state (temp files)
/// must be call-local.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Engine name/identifier for logs and diagnostics
    fn name(&self) -> &str;

    /// Check if the engine's external commands are usable on this system
    async fn is_available(&self) -> bool;

    /// Synthesize text to a WAV audio clip
    async fn synthesize(&self, text: &str, options: &SynthesisOptions) -> TtsResult<AudioClip>;

    /// Enumerate the voices the OS capability offers
    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>>;
}
