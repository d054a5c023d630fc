//! Resolution strategies
//!
//! Each strategy is a standalone function from a content reference (plus the
//! injected capabilities) to an opened source. The resolver decides the order;
//! the strategies know nothing about each other.

use std::path::PathBuf;
use thiserror::Error;
use tonebox_core::{
    ContentRef, ContentStore, OpenError, ResolvedSource, SourceDescriptor, SourceOpener,
    StoreError, StrategyKind,
};

/// Why a single cascade step failed
///
/// Never surfaced to callers; the resolver logs it and moves on.
#[derive(Debug, Error)]
pub enum StepError {
    /// The store lookup for the reference's path failed
    #[error("path lookup failed: {0}")]
    Lookup(#[from] StoreError),

    /// Opening the stream failed
    #[error("open failed: {0}")]
    Open(#[from] OpenError),

    /// The reference has no filesystem form to work with
    #[error("no path derivable from {0}")]
    NoPath(String),
}

/// Filesystem path behind a reference
///
/// Store references go through the store's secondary lookup; anything else is
/// already a path.
pub async fn derive_path(
    store: &dyn ContentStore,
    reference: &ContentRef,
) -> Result<PathBuf, StepError> {
    if reference.is_store_reference() {
        Ok(store.resolve_path(reference).await?)
    } else {
        reference
            .as_path()
            .ok_or_else(|| StepError::NoPath(reference.to_string()))
    }
}

/// Strategy 1: open the reference as-is
pub async fn direct_reference(
    opener: &dyn SourceOpener,
    reference: &ContentRef,
) -> Result<ResolvedSource, StepError> {
    let handle = opener.open_reference(reference).await?;
    Ok(ResolvedSource::new(
        StrategyKind::DirectReference,
        SourceDescriptor::Reference(reference.clone()),
        handle,
    ))
}

/// Strategy 2: look up the filesystem path, open the path
pub async fn path_indirection(
    store: &dyn ContentStore,
    opener: &dyn SourceOpener,
    reference: &ContentRef,
) -> Result<ResolvedSource, StepError> {
    let path = derive_path(store, reference).await?;
    let handle = opener.open_path(&path).await?;
    Ok(ResolvedSource::new(
        StrategyKind::PathIndirection,
        SourceDescriptor::Path(path),
        handle,
    ))
}

/// Strategy 3: open the file and hand over its descriptor instead of a path
pub async fn descriptor(
    store: &dyn ContentStore,
    opener: &dyn SourceOpener,
    reference: &ContentRef,
) -> Result<ResolvedSource, StepError> {
    let path = derive_path(store, reference).await?;
    let handle = opener.open_descriptor(&path).await?;
    let fd = handle.raw_descriptor();
    Ok(ResolvedSource::new(
        StrategyKind::Descriptor,
        SourceDescriptor::Descriptor { path, fd },
        handle,
    ))
}

/// Strategy 4: derive the path once more and make a final direct open
pub async fn terminal_rederivation(
    store: &dyn ContentStore,
    opener: &dyn SourceOpener,
    reference: &ContentRef,
) -> Result<ResolvedSource, StepError> {
    let path = derive_path(store, reference).await?;
    let handle = opener.open_path(&path).await?;
    Ok(ResolvedSource::new(
        StrategyKind::TerminalRederivation,
        SourceDescriptor::Path(path),
        handle,
    ))
}
