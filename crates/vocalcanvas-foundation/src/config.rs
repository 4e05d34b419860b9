//! Application configuration
//!
//! Configuration is layered: built-in defaults, then an optional
//! `vocalcanvas.toml` next to the working directory, then `VOCALCANVAS_*`
//! environment variables. The loaded value is passed explicitly to whichever
//! component needs it; nothing reads configuration through globals.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use vocalcanvas_tts::validate_rate;

use crate::error::AppError;

/// Environment variable prefix, e.g. `VOCALCANVAS_DEMO_MAX_CHARS=280`.
pub const ENV_PREFIX: &str = "VOCALCANVAS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the demo HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Directory where generated demo audio artifacts are written.
    pub output_dir: PathBuf,
    /// Directory holding prebuilt desktop packages served by the download routes.
    pub downloads_dir: PathBuf,
    /// Maximum trimmed character count accepted by the demo endpoint.
    pub demo_max_chars: usize,
    /// Demo artifacts older than this are deleted by the retention sweep.
    pub retention_max_age_secs: u64,
    /// Speaking rate used when a request does not specify one.
    pub default_rate_wpm: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5050".parse().expect("valid default address"),
            output_dir: PathBuf::from("generated_audio"),
            downloads_dir: PathBuf::from("downloads"),
            demo_max_chars: 200,
            retention_max_age_secs: 12 * 60 * 60,
            default_rate_wpm: 170,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, optional `vocalcanvas.toml`, and
    /// `VOCALCANVAS_*` environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let loaded: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("vocalcanvas").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values that would make the demo service misbehave silently.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.demo_max_chars == 0 {
            return Err(AppError::Config(
                "demo_max_chars must be at least 1".to_string(),
            ));
        }
        if self.retention_max_age_secs == 0 {
            return Err(AppError::Config(
                "retention_max_age_secs must be at least 1".to_string(),
            ));
        }
        validate_rate(self.default_rate_wpm)
            .map_err(|e| AppError::Config(format!("default_rate_wpm: {e}")))?;
        Ok(())
    }

    pub fn retention_max_age(&self) -> Duration {
        Duration::from_secs(self.retention_max_age_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.demo_max_chars, 200);
        assert_eq!(config.default_rate_wpm, 170);
        assert_eq!(config.retention_max_age(), Duration::from_secs(43_200));
    }

    #[test]
    fn zero_char_limit_is_rejected() {
        let config = AppConfig {
            demo_max_chars: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn zero_retention_is_rejected() {
        let config = AppConfig {
            retention_max_age_secs: 0,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn out_of_range_default_rate_is_rejected() {
        for rate in [0, 79, 401, 999] {
            let config = AppConfig {
                default_rate_wpm: rate,
                ..AppConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(AppError::Config(_))),
                "rate {rate} should be rejected"
            );
        }

        let config = AppConfig {
            default_rate_wpm: 400,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
