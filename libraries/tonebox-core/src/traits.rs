/// Capability traits for Tonebox
///
/// The platform's content store, stream opener and audio sink are injected
/// through these traits; nothing in Tonebox reaches them through global state.
use crate::error::{OpenError, SinkError, StoreError};
use crate::types::{ContentRef, ResolvedSource, SessionId, StoreQuery, StoreRow};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Queryable content store
///
/// Both operations may block or take a while; callers run them on a worker
/// context.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run a query against one location
    ///
    /// # Errors
    /// `Unreachable` if the store cannot be reached, `MalformedFilter` if the
    /// filter does not parse in the store grammar
    async fn query(&self, query: &StoreQuery) -> Result<Vec<StoreRow>, StoreError>;

    /// Secondary lookup from a store reference to the filesystem path of its bytes
    ///
    /// # Errors
    /// `NotFound` if the reference names no row or the row has no path
    async fn resolve_path(&self, reference: &ContentRef) -> Result<PathBuf, StoreError>;
}

/// An open handle to underlying storage
pub trait StreamHandle: Send + Sync {
    /// Release the handle. Called at most once.
    fn close(&mut self) -> Result<(), OpenError>;

    /// Low-level descriptor number, when the handle has one
    fn raw_descriptor(&self) -> Option<i32> {
        None
    }
}

/// Opens stream handles in the three ways the resolution cascade needs
#[async_trait]
pub trait SourceOpener: Send + Sync {
    /// Open a content reference as-is
    async fn open_reference(&self, reference: &ContentRef)
        -> Result<Box<dyn StreamHandle>, OpenError>;

    /// Open a filesystem path for path-based playback
    async fn open_path(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError>;

    /// Open a file and keep its descriptor for descriptor-based playback
    async fn open_descriptor(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError>;
}

/// Receiver of asynchronous sink notifications
///
/// Implemented by the playback session manager.
#[async_trait]
pub trait SignalTarget: Send + Sync {
    async fn prepared(&self, session: SessionId);
    async fn failed(&self, session: SessionId, code: i32);
}

/// Notification handle given to a sink for one session
///
/// Sinks report preparation results and later playback errors through it.
/// Notifications for a superseded session are discarded by the receiver.
#[derive(Clone)]
pub struct SinkNotifier {
    session: SessionId,
    target: Arc<dyn SignalTarget>,
}

impl SinkNotifier {
    pub fn new(session: SessionId, target: Arc<dyn SignalTarget>) -> Self {
        Self { session, target }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Report that preparation finished
    pub async fn ready(&self) {
        self.target.prepared(self.session).await;
    }

    /// Report a sink error
    pub async fn error(&self, code: i32) {
        self.target.failed(self.session, code).await;
    }
}

impl std::fmt::Debug for SinkNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkNotifier")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Audio output sink
///
/// The session manager calls these with its session lock held. A sink must
/// therefore never await its [`SinkNotifier`] from inside `prepare`; report
/// from a spawned task instead.
#[async_trait]
pub trait PlaybackSink: Send {
    /// Bind a resolved source
    async fn open(&mut self, source: &ResolvedSource) -> Result<(), SinkError>;

    /// Request asynchronous preparation; the outcome arrives via `notifier`
    fn prepare(&mut self, notifier: SinkNotifier) -> Result<(), SinkError>;

    /// Begin playback of a prepared source
    fn start(&mut self) -> Result<(), SinkError>;

    /// Stop and drop everything bound to the sink. Must be idempotent.
    fn release(&mut self);
}
