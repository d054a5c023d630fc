//! Playback session manager
//!
//! Owns the sink and at most one resolved source. Every operation that touches
//! the sink or the bound source runs under one lock, so `play`, `stop` and
//! sink notifications are totally ordered.
//!
//! State machine: `Idle -> Preparing -> Playing -> Idle`, with `Releasing` as
//! the transient step of every teardown. Each `play` allocates a new
//! [`SessionId`]; notifications carrying an older id are dropped.

use crate::events::PlaybackEvent;
use crate::resolver::SourceResolver;
use async_trait::async_trait;
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, Mutex};
use tonebox_core::{
    CatalogEntry, PlaybackError, PlaybackSink, ResolvedSource, SessionId, SessionState,
    SignalTarget, SinkNotifier,
};
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Drives a single playback sink, one session at a time
pub struct PlaybackSessionManager {
    resolver: SourceResolver,
    shared: Arc<Shared>,
}

struct Shared {
    slot: Mutex<Slot>,
    events: broadcast::Sender<PlaybackEvent>,
}

struct Slot {
    sink: Box<dyn PlaybackSink>,
    session: SessionId,
    state: SessionState,
    source: Option<ResolvedSource>,
}

impl PlaybackSessionManager {
    pub fn new(resolver: SourceResolver, sink: Box<dyn PlaybackSink>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            resolver,
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    sink,
                    session: SessionId::new(0),
                    state: SessionState::Idle,
                    source: None,
                }),
                events,
            }),
        }
    }

    /// Start playing an entry, superseding whatever is playing
    ///
    /// The previous session is fully released before the new reference is
    /// resolved. Returns once the sink has been asked to prepare; the move to
    /// `Playing` happens when the sink reports ready.
    ///
    /// Failures are returned and also emitted as [`PlaybackEvent::Error`];
    /// either way the session is back to `Idle` with nothing bound.
    pub async fn play(&self, entry: &CatalogEntry) -> Result<SessionId, PlaybackError> {
        let mut slot = self.shared.slot.lock().await;
        self.shared.release(&mut slot);

        let session = slot.session.next();
        slot.session = session;
        info!(
            session = %session,
            reference = %entry.content_ref,
            "Playing {}",
            entry.display_name
        );

        let source = match self.resolver.resolve(entry).await {
            Ok(source) => source,
            Err(e) => {
                let error = PlaybackError::from(e);
                self.shared.fail(&mut slot, error.clone());
                return Err(error);
            }
        };

        if let Err(e) = slot.sink.open(&source).await {
            slot.sink.release();
            close_source(session, source);
            let error = PlaybackError::from(e);
            self.shared.fail(&mut slot, error.clone());
            return Err(error);
        }

        debug!(session = %session, strategy = %source.strategy(), "Source bound to sink");
        slot.source = Some(source);
        self.shared.transition(&mut slot, SessionState::Preparing);

        let notifier = SinkNotifier::new(
            session,
            Arc::new(SessionSignals {
                shared: Arc::downgrade(&self.shared),
            }),
        );
        if let Err(e) = slot.sink.prepare(notifier) {
            let error = PlaybackError::from(e);
            self.shared.fail(&mut slot, error.clone());
            return Err(error);
        }

        Ok(session)
    }

    /// Stop the current session, if any. Idempotent.
    pub async fn stop(&self) {
        let mut slot = self.shared.slot.lock().await;
        if slot.state.is_active() {
            info!(session = %slot.session, "Stopping playback");
        }
        self.shared.release(&mut slot);
    }

    pub async fn state(&self) -> SessionState {
        self.shared.slot.lock().await.state
    }

    /// Id of the active session; `None` while idle
    pub async fn session(&self) -> Option<SessionId> {
        let slot = self.shared.slot.lock().await;
        slot.state.is_active().then_some(slot.session)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.shared.events.subscribe()
    }
}

impl Drop for PlaybackSessionManager {
    fn drop(&mut self) {
        match self.shared.slot.try_lock() {
            Ok(mut slot) => self.shared.release(&mut slot),
            Err(_) => debug!("Session manager dropped mid-notification; slot releases on its own"),
        }
    }
}

/// Last line of teardown: whoever drops the slot last releases what it holds
impl Drop for Slot {
    fn drop(&mut self) {
        if !self.state.is_active() {
            return;
        }
        debug!(session = %self.session, "Releasing sink on teardown");
        self.sink.release();
        if let Some(source) = self.source.take() {
            close_source(self.session, source);
        }
        self.state = SessionState::Idle;
    }
}

impl Shared {
    fn emit(&self, event: PlaybackEvent) {
        // Err only means nobody is subscribed
        let _ = self.events.send(event);
    }

    fn transition(&self, slot: &mut Slot, state: SessionState) {
        slot.state = state;
        debug!(session = %slot.session, state = ?state, "Session state changed");
        self.emit(PlaybackEvent::StateChanged {
            session: slot.session,
            state,
        });
    }

    /// Tear down the bound sink and source; no-op when idle
    fn release(&self, slot: &mut Slot) {
        if !slot.state.is_active() {
            return;
        }

        self.transition(slot, SessionState::Releasing);
        slot.sink.release();
        if let Some(source) = slot.source.take() {
            close_source(slot.session, source);
        }
        self.transition(slot, SessionState::Idle);
    }

    fn fail(&self, slot: &mut Slot, error: PlaybackError) {
        warn!(session = %slot.session, "Playback failed: {}", error);
        self.release(slot);
        self.emit(PlaybackEvent::Error {
            session: slot.session,
            error,
        });
    }
}

fn close_source(session: SessionId, source: ResolvedSource) {
    if let Err(e) = source.close() {
        warn!(session = %session, "Failed to close source: {}", e);
    }
}

/// Notification receiver handed to the sink, one per session
///
/// Holds the manager weakly; notifications arriving after the manager is gone
/// are dropped.
struct SessionSignals {
    shared: Weak<Shared>,
}

#[async_trait]
impl SignalTarget for SessionSignals {
    async fn prepared(&self, session: SessionId) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut slot = shared.slot.lock().await;

        if slot.session != session || slot.state != SessionState::Preparing {
            debug!(
                session = %session,
                current = %slot.session,
                state = ?slot.state,
                "Discarding stale ready notification"
            );
            return;
        }

        match slot.sink.start() {
            Ok(()) => shared.transition(&mut slot, SessionState::Playing),
            Err(e) => shared.fail(&mut slot, e.into()),
        }
    }

    async fn failed(&self, session: SessionId, code: i32) {
        let Some(shared) = self.shared.upgrade() else {
            return;
        };
        let mut slot = shared.slot.lock().await;

        if slot.session != session || !slot.state.is_active() {
            debug!(
                session = %session,
                current = %slot.session,
                code,
                "Discarding stale sink error"
            );
            return;
        }

        shared.fail(&mut slot, PlaybackError::SinkError(code));
    }
}
