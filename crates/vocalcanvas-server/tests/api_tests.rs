//! End-to-end tests for the demo HTTP surface, driven through the router
//! with a fake synthesizer so no OS speech command is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use vocalcanvas_foundation::AppConfig;
use vocalcanvas_server::{router, AppState, ArtifactStore};
use vocalcanvas_tts::{MockSynthesizer, SpeechSynthesizer, VoiceRegistry};

struct TestApp {
    state: AppState,
    // Held so the directories outlive the test.
    _output_dir: tempfile::TempDir,
    downloads_dir: tempfile::TempDir,
}

async fn test_app(engine: Arc<dyn SpeechSynthesizer>) -> TestApp {
    let output_dir = tempfile::tempdir().unwrap();
    let downloads_dir = tempfile::tempdir().unwrap();

    let config = AppConfig {
        output_dir: output_dir.path().to_path_buf(),
        downloads_dir: downloads_dir.path().to_path_buf(),
        ..AppConfig::default()
    };

    let voices = engine.list_voices().await.unwrap();
    let registry = Arc::new(VoiceRegistry::new(voices));
    let store = ArtifactStore::new(&config.output_dir, config.retention_max_age());

    TestApp {
        state: AppState {
            config,
            engine,
            registry,
            store,
        },
        _output_dir: output_dir,
        downloads_dir,
    }
}

fn speak_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/demo-speak")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn demo_speak_produces_playable_artifact() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let response = router(app.state.clone())
        .oneshot(speak_request(serde_json::json!({ "text": "Hello world" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["characters"], 11);
    assert_eq!(body["format"], "wav");
    assert_eq!(body["voice"], "Samantha");
    assert_eq!(body["rate"], 170);

    let audio_url = body["audio_url"].as_str().unwrap();
    assert!(audio_url.starts_with("/audio/demo_"));

    // The artifact must exist on disk and be a real, non-empty WAV.
    let filename = audio_url.strip_prefix("/audio/").unwrap();
    let path = app.state.store.dir().join(filename);
    let reader = hound::WavReader::open(&path).unwrap();
    assert!(reader.duration() > 0);

    // And it must be fetchable through the audio route.
    let response = router(app.state.clone())
        .oneshot(
            Request::builder()
                .uri(audio_url)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "audio/wav"
    );
}

#[tokio::test]
async fn empty_text_is_rejected_without_artifact() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let response = router(app.state.clone())
        .oneshot(speak_request(serde_json::json!({ "text": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Enter text before generating demo audio.");

    let entries: Vec<_> = std::fs::read_dir(app.state.store.dir())
        .unwrap()
        .collect();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn text_over_the_limit_is_rejected() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let limit = app.state.config.demo_max_chars;

    let response = router(app.state.clone())
        .oneshot(speak_request(
            serde_json::json!({ "text": "a".repeat(limit + 1) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        format!("Demo is limited to {limit} characters.")
    );

    // Exactly at the limit is fine.
    let response = router(app.state.clone())
        .oneshot(speak_request(
            serde_json::json!({ "text": "a".repeat(limit) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn out_of_range_rate_is_rejected() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    for rate in [79, 401] {
        let response = router(app.state.clone())
            .oneshot(speak_request(
                serde_json::json!({ "text": "Hello", "rate": rate }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = router(app.state.clone())
        .oneshot(speak_request(
            serde_json::json!({ "text": "Hello", "rate": 80 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["rate"], 80);
}

#[tokio::test]
async fn unknown_voice_falls_back_to_default() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let response = router(app.state.clone())
        .oneshot(speak_request(
            serde_json::json!({ "text": "Hello", "voice": "Zarvox" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["voice"], "Samantha");
}

#[tokio::test]
async fn synthesis_failure_maps_to_server_error() {
    let app = test_app(Arc::new(MockSynthesizer::failing("engine exploded"))).await;
    let response = router(app.state.clone())
        .oneshot(speak_request(serde_json::json!({ "text": "Hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Audio generation failed.");
    assert!(body["detail"].as_str().unwrap().contains("engine exploded"));
}

#[tokio::test]
async fn concurrent_requests_get_distinct_artifacts() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;

    // Both requests in flight at once against the same store.
    let (first, second) = tokio::join!(
        router(app.state.clone()).oneshot(speak_request(serde_json::json!({ "text": "First" }))),
        router(app.state.clone()).oneshot(speak_request(serde_json::json!({ "text": "Second" }))),
    );
    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let first_url = json_body(first).await["audio_url"].as_str().unwrap().to_string();
    let second_url = json_body(second).await["audio_url"].as_str().unwrap().to_string();
    assert_ne!(first_url, second_url);

    for url in [&first_url, &second_url] {
        let filename = url.strip_prefix("/audio/").unwrap();
        assert!(app.state.store.dir().join(filename).is_file());
    }
}

#[tokio::test]
async fn audio_route_blocks_traversal() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    for path in ["/audio/..%2Fsecret.wav", "/audio/notes.txt", "/audio/missing.wav"] {
        let response = router(app.state.clone())
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn download_serves_package_with_no_cache_headers() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    std::fs::write(
        app.downloads_dir.path().join("VocalCanvas.dmg"),
        b"dmg payload",
    )
    .unwrap();

    let response = router(app.state.clone())
        .oneshot(
            Request::builder()
                .uri("/download/macos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"VocalCanvas.dmg\""
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"dmg payload");
}

#[tokio::test]
async fn missing_download_and_bad_platform_are_not_found() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;

    // windows package not built yet
    let response = router(app.state.clone())
        .oneshot(
            Request::builder()
                .uri("/download/windows")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "VocalCanvasWindows.zip is not available yet.");

    let response = router(app.state.clone())
        .oneshot(
            Request::builder()
                .uri("/download/linux")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn voices_endpoint_reports_registry_and_limit() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let response = router(app.state.clone())
        .oneshot(
            Request::builder()
                .uri("/api/voices")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["default_voice"], "Samantha");
    assert_eq!(body["demo_limit"], 200);
    assert_eq!(body["voices"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn health_reports_engine_name() {
    let app = test_app(Arc::new(MockSynthesizer::new())).await;
    let response = router(app.state.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"], "mock");
}
