//! Operating-system command speech backends for Vocal Canvas
//!
//! Three engines cover the supported platforms: macOS `say` (converted to
//! WAV with `afconvert`), Linux `espeak`/`espeak-ng` (WAV straight from
//! stdout), and Windows SAPI via PowerShell. `detect_synthesizer` probes
//! them in platform order and returns the first one whose commands are
//! actually present.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use vocalcanvas_tts::{SpeechSynthesizer, TtsError, TtsResult};

pub mod espeak;
pub mod sapi;
pub mod say;

#[cfg(test)]
mod tests;

pub use espeak::EspeakEngine;
pub use sapi::SapiEngine;
pub use say::SayEngine;

/// Locate an external tool on PATH, with a `/usr/bin` fallback for GUI
/// launch contexts where PATH can be stripped down.
pub fn resolve_tool(name: &str) -> Option<PathBuf> {
    if let Some(paths) = env::var_os("PATH") {
        for dir in env::split_paths(&paths) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    let fallback = Path::new("/usr/bin").join(name);
    if fallback.is_file() {
        return Some(fallback);
    }

    None
}

/// Create a platform-appropriate speech synthesizer.
///
/// Probes backends in order:
/// 1. macOS `say` + `afconvert`
/// 2. `espeak` / `espeak-ng`
/// 3. Windows SAPI through PowerShell
///
/// Returns the first available engine, or an error naming everything that
/// was tried so the operator knows what to install.
pub async fn detect_synthesizer() -> TtsResult<Arc<dyn SpeechSynthesizer>> {
    match SayEngine::discover() {
        Ok(engine) => {
            info!(engine = engine.name(), "Initialized say speech backend");
            return Ok(Arc::new(engine));
        }
        Err(e) => {
            info!("say backend unavailable: {}", e);
        }
    }

    match EspeakEngine::detect().await {
        Ok(engine) => {
            info!(engine = engine.name(), "Initialized espeak speech backend");
            return Ok(Arc::new(engine));
        }
        Err(e) => {
            info!("espeak backend unavailable: {}", e);
        }
    }

    match SapiEngine::detect().await {
        Ok(engine) => {
            info!(engine = engine.name(), "Initialized SAPI speech backend");
            return Ok(Arc::new(engine));
        }
        Err(e) => {
            info!("SAPI backend unavailable: {}", e);
        }
    }

    Err(TtsError::EngineNotAvailable(
        "No speech backend available. Tried:\n\
         1. say + afconvert (preinstalled on macOS)\n\
         2. espeak / espeak-ng (install: sudo apt install espeak-ng)\n\
         3. PowerShell System.Speech (preinstalled on Windows)"
            .to_string(),
    ))
}
