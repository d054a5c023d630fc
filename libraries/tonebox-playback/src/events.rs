//! Playback Events
//!
//! Emitted on a broadcast channel at every session transition and whenever a
//! play request or the sink fails. Subscribers that lag simply miss events;
//! the session itself never waits on them.

use tonebox_core::{PlaybackError, SessionId, SessionState};

/// Events emitted by the session manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The session moved to a new state
    StateChanged {
        /// Session the transition belongs to
        session: SessionId,
        /// The new state
        state: SessionState,
    },

    /// A play request or an active session failed
    ///
    /// The session is already back to `Idle` when this is emitted.
    Error {
        session: SessionId,
        error: PlaybackError,
    },
}

impl PlaybackEvent {
    pub fn session(&self) -> SessionId {
        match self {
            PlaybackEvent::StateChanged { session, .. } | PlaybackEvent::Error { session, .. } => {
                *session
            }
        }
    }
}
