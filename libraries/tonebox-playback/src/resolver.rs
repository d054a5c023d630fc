//! Source resolver
//!
//! Runs the resolution strategies in their fixed order and returns the first
//! source that opens. A failed step is logged and the next one is tried; only
//! exhaustion is an error. Nothing is cached: every call starts from
//! strategy 1.

use crate::strategies::{self, StepError};
use std::sync::Arc;
use tonebox_core::{
    CatalogEntry, ContentRef, ContentStore, ResolutionError, ResolvedSource, SourceOpener,
    StrategyKind,
};
use tracing::{debug, warn};

/// Resolves content references into opened sources
#[derive(Clone)]
pub struct SourceResolver {
    store: Arc<dyn ContentStore>,
    opener: Arc<dyn SourceOpener>,
}

impl SourceResolver {
    pub fn new(store: Arc<dyn ContentStore>, opener: Arc<dyn SourceOpener>) -> Self {
        Self { store, opener }
    }

    /// Resolve a catalog entry's reference
    pub async fn resolve(&self, entry: &CatalogEntry) -> Result<ResolvedSource, ResolutionError> {
        self.resolve_reference(&entry.content_ref).await
    }

    /// Resolve a reference through the cascade
    ///
    /// At most one stream is left open: the one returned. Failed steps never
    /// hand back a handle.
    ///
    /// # Errors
    /// `Unresolvable` once every strategy has failed
    pub async fn resolve_reference(
        &self,
        reference: &ContentRef,
    ) -> Result<ResolvedSource, ResolutionError> {
        for kind in StrategyKind::CASCADE {
            match self.attempt(kind, reference).await {
                Ok(source) => {
                    debug!(strategy = %kind, reference = %reference, "Resolved source");
                    return Ok(source);
                }
                Err(e) => {
                    debug!(strategy = %kind, reference = %reference, "Strategy failed: {}", e);
                }
            }
        }

        warn!(reference = %reference, "All resolution strategies failed");
        Err(ResolutionError::Unresolvable {
            reference: reference.to_string(),
            attempts: StrategyKind::CASCADE.len(),
        })
    }

    async fn attempt(
        &self,
        kind: StrategyKind,
        reference: &ContentRef,
    ) -> Result<ResolvedSource, StepError> {
        let store = self.store.as_ref();
        let opener = self.opener.as_ref();
        match kind {
            StrategyKind::DirectReference => strategies::direct_reference(opener, reference).await,
            StrategyKind::PathIndirection => {
                strategies::path_indirection(store, opener, reference).await
            }
            StrategyKind::Descriptor => strategies::descriptor(store, opener, reference).await,
            StrategyKind::TerminalRederivation => {
                strategies::terminal_rederivation(store, opener, reference).await
            }
        }
    }
}
