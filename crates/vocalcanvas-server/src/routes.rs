//! HTTP routes for the demo service
//!
//! The web surface is deliberately small: one synthesis endpoint, artifact
//! playback, desktop package downloads, and a couple of read-only endpoints
//! the front end uses to populate its controls.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use vocalcanvas_foundation::AppConfig;
use vocalcanvas_tts::{validate_rate, SpeechSynthesizer, SynthesisOptions, VoiceRegistry};

use crate::artifacts::ArtifactStore;
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<dyn SpeechSynthesizer>,
    pub registry: Arc<VoiceRegistry>,
    pub store: ArtifactStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/demo-speak", post(demo_speak))
        .route("/api/voices", get(voices))
        .route("/audio/:filename", get(serve_audio))
        .route("/download/:platform", get(download))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct DemoSpeakRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub rate: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DemoSpeakResponse {
    pub audio_url: String,
    pub voice: String,
    pub rate: u32,
    pub characters: usize,
    pub format: &'static str,
}

/// Generate a short demo clip and return a URL the browser can play.
async fn demo_speak(
    State(state): State<AppState>,
    Json(request): Json<DemoSpeakRequest>,
) -> Result<Json<DemoSpeakResponse>, ApiError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::bad_request(
            "Enter text before generating demo audio.",
        ));
    }
    let characters = text.chars().count();
    if characters > state.config.demo_max_chars {
        return Err(ApiError::bad_request(format!(
            "Demo is limited to {} characters.",
            state.config.demo_max_chars
        )));
    }

    let rate = request.rate.unwrap_or(state.config.default_rate_wpm);
    let rate = validate_rate(rate).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let voice = state
        .registry
        .resolve(request.voice.as_deref())
        .ok_or_else(|| ApiError::internal("No voices are available on this system."))?
        .id
        .clone();

    let options = SynthesisOptions::default()
        .with_voice(voice.clone())
        .with_rate(rate);
    let clip = state
        .engine
        .synthesize(text, &options)
        .await
        .map_err(|e| {
            ApiError::internal("Audio generation failed.").with_detail(e.to_string())
        })?;

    let filename = state
        .store
        .store(&clip)
        .await
        .map_err(|e| ApiError::internal("Could not save demo audio.").with_detail(e.to_string()))?;

    info!(voice, rate, characters, filename, "Generated demo clip");

    // Old artifacts ride out with each successful request.
    state.store.sweep().await;

    Ok(Json(DemoSpeakResponse {
        audio_url: format!("/audio/{filename}"),
        voice,
        rate,
        characters,
        format: "wav",
    }))
}

/// Stream a generated artifact back to the browser.
async fn serve_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let path = state
        .store
        .resolve(&filename)
        .ok_or_else(|| ApiError::not_found("Audio not found."))?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::not_found("Audio not found."))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/wav")],
        bytes,
    ))
}

/// Serve a prebuilt desktop package.
///
/// Responses are marked uncacheable so users always fetch the package that
/// is actually on disk, not a stale proxy copy.
async fn download(
    State(state): State<AppState>,
    Path(platform): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = match platform.as_str() {
        "macos" => "VocalCanvas.dmg",
        "windows" => "VocalCanvasWindows.zip",
        _ => return Err(ApiError::not_found("Unknown download platform.")),
    };

    let path = state.config.downloads_dir.join(filename);
    let bytes = tokio::fs::read(&path).await.map_err(|_| {
        ApiError::not_found(format!("{filename} is not available yet."))
    })?;

    info!(platform, filename, bytes = bytes.len(), "Serving download");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (header::PRAGMA, "no-cache".to_string()),
            (header::EXPIRES, "0".to_string()),
        ],
        bytes,
    ))
}

/// Voices and limits the front end needs to render its controls.
async fn voices(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "voices": state.registry.voices(),
        "default_voice": state.registry.default_voice().map(|v| v.id.clone()),
        "demo_limit": state.config.demo_max_chars,
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "engine": state.engine.name(),
    }))
}
