use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use vocalcanvas_studio::{phase_label, AudioPlayer, CommandPlayer, NullPlayer, StudioSession};
use vocalcanvas_tts::{VoiceRegistry, MAX_RATE_WPM, MIN_RATE_WPM};
use vocalcanvas_tts_os::detect_synthesizer;

const TEXT_LIMIT: usize = 5000;

const HELP: &str = "\
Commands:
  text <words...>   set the text to speak
  voice <name>      select a voice
  rate <wpm>        set speaking rate (80-400)
  preview           synthesize and play the current text
  export <path>     synthesize and save a WAV file
  voices            list available voices
  status            show current settings
  quit              exit";

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "vocalcanvas-studio.log");
    let (non_blocking_file, _guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(_guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging().map_err(|e| anyhow::anyhow!("logging setup failed: {e}"))?;

    let engine = detect_synthesizer()
        .await
        .context("no speech backend available")?;
    let voices = engine
        .list_voices()
        .await
        .context("could not enumerate voices")?;
    let registry = Arc::new(VoiceRegistry::new(voices));

    let player: Box<dyn AudioPlayer> = match CommandPlayer::detect() {
        Ok(player) => Box::new(player),
        Err(e) => {
            eprintln!("Warning: {e}; previews will be silent");
            Box::new(NullPlayer::new())
        }
    };

    let mut session = StudioSession::new(engine, registry, player, TEXT_LIMIT);

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("Vocal Canvas Studio\n{HELP}\n").as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        let reply = match command {
            "" => continue,
            "text" => {
                session.set_text(argument);
                format!(
                    "{} characters",
                    session.controller().character_count()
                )
            }
            "voice" => match session.set_voice(argument) {
                Ok(()) => format!("voice: {argument}"),
                Err(e) => e.to_string(),
            },
            "rate" => match argument.parse::<u32>() {
                Ok(rate) => match session.set_rate(rate) {
                    Ok(()) => format!("rate: {rate} wpm"),
                    Err(e) => e.to_string(),
                },
                Err(_) => format!("rate must be a number between {MIN_RATE_WPM} and {MAX_RATE_WPM}"),
            },
            "preview" => match session.preview().await {
                Ok(()) => "playing".to_string(),
                Err(e) => e.to_string(),
            },
            "export" => {
                if argument.is_empty() {
                    "usage: export <path>".to_string()
                } else {
                    match session.export(Path::new(argument)).await {
                        Ok(path) => format!("saved {}", path.display()),
                        Err(e) => e.to_string(),
                    }
                }
            }
            "voices" => {
                let mut out = String::new();
                for voice in session.voices().voices() {
                    out.push_str(&voice.id);
                    if let Some(language) = &voice.language {
                        out.push_str(&format!(" ({language})"));
                    }
                    out.push('\n');
                }
                out.trim_end().to_string()
            }
            "status" => format!(
                "text: {:?}\nvoice: {}\nrate: {} wpm\nstate: {}",
                session.text(),
                session.voice().unwrap_or("(none)"),
                session.rate(),
                phase_label(session.controller().phase())
            ),
            "quit" | "exit" => break,
            "help" => HELP.to_string(),
            other => format!("unknown command: {other} (try help)"),
        };

        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    session.stop();
    Ok(())
}
