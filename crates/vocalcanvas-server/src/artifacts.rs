//! Demo artifact storage
//!
//! Generated clips land in one flat directory as `demo_<id>.wav` and are
//! deleted by age. The sweep runs inline after each successful generation
//! rather than on a timer, so a quiet server accumulates nothing new and an
//! active one cleans up as it goes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use vocalcanvas_tts::{next_artifact_id, AudioClip};

/// Filesystem store for generated demo audio.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    max_age: Duration,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a clip under a fresh unique filename and return that filename.
    pub async fn store(&self, clip: &AudioClip) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let filename = format!("demo_{}.wav", next_artifact_id());
        tokio::fs::write(self.dir.join(&filename), &clip.wav_bytes).await?;
        debug!(filename, bytes = clip.len(), "Stored demo artifact");
        Ok(filename)
    }

    /// Resolve a client-supplied filename inside the store.
    ///
    /// Returns `None` for anything that could escape the directory: path
    /// separators, parent references, or a non-wav extension.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
            || !filename.ends_with(".wav")
        {
            return None;
        }
        Some(self.dir.join(filename))
    }

    /// Delete artifacts older than the configured maximum age.
    ///
    /// Unreadable entries are skipped with a warning; the sweep never fails
    /// a request.
    pub async fn sweep(&self) -> usize {
        let mut removed = 0;
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Retention sweep could not read {:?}: {}", self.dir, e);
                return 0;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("wav") {
                continue;
            }
            let age = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified.elapsed().unwrap_or_default(),
                Err(e) => {
                    warn!("Retention sweep skipping {:?}: {}", path, e);
                    continue;
                }
            };
            if age > self.max_age {
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        debug!(?path, "Removed expired demo artifact");
                        removed += 1;
                    }
                    Err(e) => warn!("Failed to remove expired artifact {:?}: {}", path, e),
                }
            }
        }

        removed
    }
}
