//! Demo HTTP service for Vocal Canvas
//!
//! A small axum application wrapping the speech layer: text comes in as
//! JSON, WAV artifacts go out by URL, and prebuilt desktop packages are
//! served for download.

pub mod artifacts;
pub mod error;
pub mod routes;

pub use artifacts::ArtifactStore;
pub use error::ApiError;
pub use routes::{router, AppState};
