//! Playback session identity and lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation number of a playback session
///
/// Every `play` allocates a fresh, strictly greater id. Asynchronous sink
/// notifications carry the id they were issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Preparing,
    Playing,
    Releasing,
}

impl SessionState {
    /// Whether a source may be bound in this state
    pub fn is_active(self) -> bool {
        !matches!(self, SessionState::Idle)
    }
}
