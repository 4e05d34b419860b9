//! Foundation crate tests
//!
//! Tests cover:
//! - Configuration loading and environment overrides
//! - Error types and display formatting

use serial_test::serial;
use std::env;
use vocalcanvas_foundation::config::AppConfig;
use vocalcanvas_foundation::error::AppError;

fn clear_overrides() {
    for var in [
        "VOCALCANVAS_LISTEN_ADDR",
        "VOCALCANVAS_OUTPUT_DIR",
        "VOCALCANVAS_DOWNLOADS_DIR",
        "VOCALCANVAS_DEMO_MAX_CHARS",
        "VOCALCANVAS_RETENTION_MAX_AGE_SECS",
        "VOCALCANVAS_DEFAULT_RATE_WPM",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn load_uses_defaults_without_overrides() {
    clear_overrides();

    let config = AppConfig::load().expect("defaults should load");
    assert_eq!(config.demo_max_chars, 200);
    assert_eq!(config.listen_addr.port(), 5050);
    assert_eq!(config.output_dir.to_str(), Some("generated_audio"));
}

#[test]
#[serial]
fn environment_overrides_take_effect() {
    clear_overrides();
    env::set_var("VOCALCANVAS_DEMO_MAX_CHARS", "280");
    env::set_var("VOCALCANVAS_DEFAULT_RATE_WPM", "200");

    let config = AppConfig::load().expect("overridden config should load");
    assert_eq!(config.demo_max_chars, 280);
    assert_eq!(config.default_rate_wpm, 200);

    clear_overrides();
}

#[test]
#[serial]
fn invalid_override_is_rejected() {
    clear_overrides();
    env::set_var("VOCALCANVAS_DEMO_MAX_CHARS", "0");

    let result = AppConfig::load();
    assert!(matches!(result, Err(AppError::Config(_))));

    clear_overrides();
}

#[test]
#[serial]
fn out_of_range_rate_override_is_rejected() {
    clear_overrides();
    env::set_var("VOCALCANVAS_DEFAULT_RATE_WPM", "999");

    // A misconfigured server rate must fail at startup, not surface later
    // as a validation error blaming the client.
    let result = AppConfig::load();
    assert!(matches!(result, Err(AppError::Config(_))));

    clear_overrides();
}

#[test]
fn error_display_includes_context() {
    let err = AppError::Config("demo_max_chars must be at least 1".to_string());
    assert!(err.to_string().contains("Configuration error"));

    let err = AppError::Speech("say exited with status 1".to_string());
    assert!(err.to_string().contains("Speech synthesis error"));
}
