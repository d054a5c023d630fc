//! Hand-written capability mocks shared by the playback tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tonebox_core::{
    CatalogEntry, ContentRef, ContentStore, OpenError, PlaybackSink, ResolvedSource, SinkError,
    SinkNotifier, StoreError, StoreQuery, StoreRow, StreamHandle,
};

pub const BASE: &str = "content://media/internal/audio/media";

pub fn entry(id: i64, name: &str) -> CatalogEntry {
    CatalogEntry::new(
        id,
        name,
        ContentRef::new(format!("{}/{}", BASE, id)),
        "internal",
    )
}

// ===== Content store =====

/// Answers path lookups from a fixed table and counts them
#[derive(Default)]
pub struct MockStore {
    paths: HashMap<String, PathBuf>,
    lookups: AtomicUsize,
}

impl MockStore {
    pub fn with_path(mut self, reference: &str, path: &str) -> Self {
        self.paths.insert(reference.to_string(), PathBuf::from(path));
        self
    }

    /// Knows the path of every id in `ids` under [`BASE`]
    pub fn with_items(ids: &[i64]) -> Self {
        ids.iter().fold(Self::default(), |store, id| {
            store.with_path(
                &format!("{}/{}", BASE, id),
                &format!("/system/media/audio/{}.ogg", id),
            )
        })
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MockStore {
    async fn query(&self, _query: &StoreQuery) -> Result<Vec<StoreRow>, StoreError> {
        Ok(Vec::new())
    }

    async fn resolve_path(&self, reference: &ContentRef) -> Result<PathBuf, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.paths
            .get(reference.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(reference.to_string()))
    }
}

// ===== Source opener =====

/// Tracks how many handles are open right now and the most ever open at once
#[derive(Default)]
pub struct HandleLedger {
    live: AtomicUsize,
    max_live: AtomicUsize,
    opened: AtomicUsize,
}

impl HandleLedger {
    fn open(self: &Arc<Self>, fd: Option<i32>) -> Box<dyn StreamHandle> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);
        Box::new(MockHandle {
            ledger: Arc::clone(self),
            fd,
            closed: false,
        })
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

struct MockHandle {
    ledger: Arc<HandleLedger>,
    fd: Option<i32>,
    closed: bool,
}

impl StreamHandle for MockHandle {
    fn close(&mut self) -> Result<(), OpenError> {
        if !self.closed {
            self.closed = true;
            self.ledger.live.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn raw_descriptor(&self) -> Option<i32> {
        self.fd
    }
}

/// Opener whose three entry points succeed or fail as configured
pub struct MockOpener {
    reference_opens: bool,
    /// `open_path` calls that fail before one succeeds; `None` never succeeds
    path_opens_after: Option<usize>,
    descriptor_opens: bool,
    path_calls: AtomicUsize,
    calls: Mutex<Vec<&'static str>>,
    pub ledger: Arc<HandleLedger>,
}

impl MockOpener {
    /// Every open fails
    pub fn refusing() -> Self {
        Self {
            reference_opens: false,
            path_opens_after: None,
            descriptor_opens: false,
            path_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            ledger: Arc::new(HandleLedger::default()),
        }
    }

    pub fn reference_opens(mut self) -> Self {
        self.reference_opens = true;
        self
    }

    pub fn path_opens_after(mut self, failures: usize) -> Self {
        self.path_opens_after = Some(failures);
        self
    }

    pub fn descriptor_opens(mut self) -> Self {
        self.descriptor_opens = true;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl tonebox_core::SourceOpener for MockOpener {
    async fn open_reference(
        &self,
        reference: &ContentRef,
    ) -> Result<Box<dyn StreamHandle>, OpenError> {
        self.record("reference");
        if self.reference_opens {
            Ok(self.ledger.open(None))
        } else {
            Err(OpenError::Unsupported(reference.to_string()))
        }
    }

    async fn open_path(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError> {
        self.record("path");
        let attempt = self.path_calls.fetch_add(1, Ordering::SeqCst);
        match self.path_opens_after {
            Some(failures) if attempt >= failures => Ok(self.ledger.open(None)),
            _ => Err(OpenError::Denied(path.display().to_string())),
        }
    }

    async fn open_descriptor(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError> {
        self.record("descriptor");
        if self.descriptor_opens {
            Ok(self.ledger.open(Some(42)))
        } else {
            Err(OpenError::Denied(path.display().to_string()))
        }
    }
}

// ===== Playback sink =====

/// Shared view into a [`MockSink`] after it has been moved into a manager
#[derive(Clone, Default)]
pub struct SinkRecorder {
    calls: Arc<Mutex<Vec<&'static str>>>,
    notifiers: Arc<Mutex<Vec<SinkNotifier>>>,
}

impl SinkRecorder {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    /// Notifier handed over by the n-th `prepare`
    pub fn notifier(&self, n: usize) -> SinkNotifier {
        self.notifiers.lock().unwrap()[n].clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Sink that records calls and keeps the notifiers for the test to fire
#[derive(Default)]
pub struct MockSink {
    recorder: SinkRecorder,
    pub open_error: Option<SinkError>,
    pub prepare_error: Option<SinkError>,
    pub start_error: Option<SinkError>,
    /// Report ready from a spawned task right after `prepare`
    pub auto_ready: bool,
}

impl MockSink {
    pub fn new() -> (Self, SinkRecorder) {
        let sink = Self::default();
        let recorder = sink.recorder.clone();
        (sink, recorder)
    }
}

#[async_trait]
impl PlaybackSink for MockSink {
    async fn open(&mut self, source: &ResolvedSource) -> Result<(), SinkError> {
        assert!(source.is_open());
        self.recorder.record("open");
        match &self.open_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn prepare(&mut self, notifier: SinkNotifier) -> Result<(), SinkError> {
        self.recorder.record("prepare");
        if let Some(err) = &self.prepare_error {
            return Err(err.clone());
        }
        if self.auto_ready {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.ready().await });
        }
        self.recorder.notifiers.lock().unwrap().push(notifier);
        Ok(())
    }

    fn start(&mut self) -> Result<(), SinkError> {
        self.recorder.record("start");
        match &self.start_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        self.recorder.record("release");
    }
}
