use std::sync::Arc;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use vocalcanvas_foundation::{AppConfig, ShutdownHandler};
use vocalcanvas_server::{router, AppState, ArtifactStore};
use vocalcanvas_tts::VoiceRegistry;
use vocalcanvas_tts_os::detect_synthesizer;

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "vocalcanvas.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(_guard);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    tracing::info!("Starting Vocal Canvas demo server");

    let config = AppConfig::load()?;
    tokio::fs::create_dir_all(&config.output_dir).await?;

    let engine = detect_synthesizer().await?;
    tracing::info!("Speech backend: {}", engine.name());

    let voices = engine.list_voices().await?;
    let registry = Arc::new(VoiceRegistry::new(voices));
    if registry.is_empty() {
        tracing::warn!("Speech backend reported no voices; requests will fail");
    } else {
        tracing::info!(
            "Loaded {} voices, default {:?}",
            registry.len(),
            registry.default_voice().map(|v| v.id.as_str())
        );
    }

    let store = ArtifactStore::new(&config.output_dir, config.retention_max_age());
    let listen_addr = config.listen_addr;
    let state = AppState {
        config,
        engine,
        registry,
        store,
    };

    let shutdown = ShutdownHandler::new().install();
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!("Listening on http://{}", listen_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
