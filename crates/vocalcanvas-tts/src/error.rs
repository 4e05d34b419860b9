//! Error types for speech synthesis

use thiserror::Error;

/// Speech synthesis error types
#[derive(Error, Debug)]
pub enum TtsError {
    /// Engine is not available or not installed
    #[error("Speech engine not available: {0}")]
    EngineNotAvailable(String),

    /// Voice not found or not supported
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// Invalid text or parameter input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external speech command failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Converting the intermediate audio to WAV failed
    #[error("Audio conversion failed: {0}")]
    ConversionFailed(String),

    /// IO error (file operations, process spawning, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for speech synthesis operations
pub type TtsResult<T> = Result<T, TtsError>;
