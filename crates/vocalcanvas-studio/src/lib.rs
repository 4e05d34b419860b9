//! Interactive desktop speech wrapper for Vocal Canvas
//!
//! Wraps the speech layer in a stateful session: edit text, pick a voice
//! and rate, preview through the OS audio player, export WAV files. The
//! generate flow is governed by a small state machine so the interface can
//! never fire two generations at once.

pub mod controller;
pub mod player;
pub mod session;

pub use controller::{ControllerError, DemoController, Phase};
pub use player::{AudioPlayer, CommandPlayer, NullPlayer};
pub use session::{phase_label, StudioError, StudioSession};
