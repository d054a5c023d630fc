//! Catalog facade

use std::sync::Arc;
use tokio::sync::broadcast;
use tonebox_catalog::{CatalogQueryEngine, CategoryRegistry, QueryDiagnostics};
use tonebox_core::{
    CatalogEntry, CategoryDefinition, ContentStore, PlaybackError, PlaybackSink, QueryError,
    SessionId, SessionState, SourceOpener,
};
use tonebox_playback::{PlaybackEvent, PlaybackSessionManager, SourceResolver};
use tracing::{debug, warn};

/// Lists categories and plays their entries
///
/// The registry and the query engine are shared read-only; the session
/// manager exclusively owns the sink and whatever source is bound to it.
pub struct CatalogFacade {
    registry: Arc<CategoryRegistry>,
    engine: CatalogQueryEngine,
    session: PlaybackSessionManager,
}

impl CatalogFacade {
    /// Wire a facade from a registry and the three platform capabilities
    ///
    /// The same store serves listings and the resolver's path lookups.
    pub fn new(
        registry: CategoryRegistry,
        store: Arc<dyn ContentStore>,
        opener: Arc<dyn SourceOpener>,
        sink: Box<dyn PlaybackSink>,
    ) -> Self {
        let resolver = SourceResolver::new(Arc::clone(&store), opener);
        Self {
            registry: Arc::new(registry),
            engine: CatalogQueryEngine::new(store),
            session: PlaybackSessionManager::new(resolver, sink),
        }
    }

    pub fn registry(&self) -> &Arc<CategoryRegistry> {
        &self.registry
    }

    /// Category definitions in display order
    pub fn categories(&self) -> &[CategoryDefinition] {
        self.registry.definitions()
    }

    /// Entries of the named category
    ///
    /// An empty listing is a normal result, not an error.
    ///
    /// # Errors
    /// `UnknownCategory` if no category has this name; otherwise whatever the
    /// query engine reports
    pub async fn list_entries(&self, category: &str) -> Result<Vec<CatalogEntry>, QueryError> {
        let Some(definition) = self.registry.get(category) else {
            warn!(category, "Listing requested for unknown category");
            return Err(QueryError::UnknownCategory(category.to_string()));
        };

        debug!(category, "Listing category");
        self.engine.query(definition).await
    }

    /// Play an entry, superseding whatever is playing
    pub async fn play(&self, entry: &CatalogEntry) -> Result<SessionId, PlaybackError> {
        self.session.play(entry).await
    }

    pub async fn stop(&self) {
        self.session.stop().await;
    }

    pub async fn state(&self) -> SessionState {
        self.session.state().await
    }

    /// Playback state changes and errors
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.session.subscribe()
    }

    pub fn diagnostics(&self) -> QueryDiagnostics {
        self.engine.diagnostics()
    }
}
