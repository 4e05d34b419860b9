//! Demo flow state machine
//!
//! Pure state, no I/O: the session feeds it text edits and generation
//! outcomes, and reads back what the interface should show. Transitions
//! happen only on user action or completion; there are no timers, retries,
//! or cancellation paths.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight, no result to show.
    Idle,
    /// A generation is running; further generates are rejected.
    Loading,
    /// Last generation succeeded; holds a label for what was produced.
    Result(String),
    /// Last generation failed; holds the user-facing message.
    Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Enter text before generating audio")]
    EmptyText,
    #[error("Text exceeds the {limit} character limit")]
    OverLimit { limit: usize },
    #[error("A generation is already in progress")]
    Busy,
    #[error("No generation is in progress")]
    NotLoading,
}

#[derive(Debug)]
pub struct DemoController {
    phase: Phase,
    limit: usize,
    character_count: usize,
}

impl DemoController {
    pub fn new(limit: usize) -> Self {
        Self {
            phase: Phase::Idle,
            limit,
            character_count: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn character_count(&self) -> usize {
        self.character_count
    }

    pub fn over_limit(&self) -> bool {
        self.character_count > self.limit
    }

    /// Recompute derived state after a text edit. Allowed in any phase; a
    /// stale result or error stays on screen until the next generate.
    pub fn text_changed(&mut self, text: &str) {
        self.character_count = text.trim().chars().count();
    }

    pub fn can_generate(&self) -> bool {
        self.character_count > 0 && !self.over_limit() && self.phase != Phase::Loading
    }

    /// Enter the loading phase, or explain why generation cannot start.
    pub fn begin_generate(&mut self) -> Result<(), ControllerError> {
        if self.phase == Phase::Loading {
            return Err(ControllerError::Busy);
        }
        if self.character_count == 0 {
            return Err(ControllerError::EmptyText);
        }
        if self.over_limit() {
            return Err(ControllerError::OverLimit { limit: self.limit });
        }
        self.phase = Phase::Loading;
        Ok(())
    }

    /// Record the outcome of the in-flight generation.
    pub fn finish(&mut self, outcome: Result<String, String>) -> Result<(), ControllerError> {
        if self.phase != Phase::Loading {
            return Err(ControllerError::NotLoading);
        }
        self.phase = match outcome {
            Ok(label) => Phase::Result(label),
            Err(message) => Phase::Error(message),
        };
        Ok(())
    }
}
