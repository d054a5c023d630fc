//! Player-ready stream descriptors

use super::entry::ContentRef;
use crate::error::OpenError;
use crate::traits::StreamHandle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which resolution strategy produced a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Open the reference as-is
    DirectReference,
    /// Look up the reference's filesystem path, open the path
    PathIndirection,
    /// Open the file and hand over a low-level descriptor
    Descriptor,
    /// Repeat the lookup once more, open its result
    TerminalRederivation,
}

impl StrategyKind {
    /// Cascade order; never reordered
    pub const CASCADE: [StrategyKind; 4] = [
        StrategyKind::DirectReference,
        StrategyKind::PathIndirection,
        StrategyKind::Descriptor,
        StrategyKind::TerminalRederivation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::DirectReference => "direct_reference",
            StrategyKind::PathIndirection => "path_indirection",
            StrategyKind::Descriptor => "descriptor",
            StrategyKind::TerminalRederivation => "terminal_rederivation",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the sink is handed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceDescriptor {
    /// The store reference itself
    Reference(ContentRef),
    /// A filesystem path
    Path(PathBuf),
    /// An open file descriptor for the file at this path
    Descriptor { path: PathBuf, fd: Option<i32> },
}

/// A successfully opened stream, owned by the playback session
///
/// Holds an open handle to storage and must be closed with [`close`](Self::close).
/// Dropping an unclosed source closes it and logs a warning.
pub struct ResolvedSource {
    strategy: StrategyKind,
    descriptor: SourceDescriptor,
    handle: Option<Box<dyn StreamHandle>>,
}

impl ResolvedSource {
    pub fn new(
        strategy: StrategyKind,
        descriptor: SourceDescriptor,
        handle: Box<dyn StreamHandle>,
    ) -> Self {
        Self {
            strategy,
            descriptor,
            handle: Some(handle),
        }
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn descriptor(&self) -> &SourceDescriptor {
        &self.descriptor
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Close the underlying handle
    pub fn close(mut self) -> Result<(), OpenError> {
        match self.handle.take() {
            Some(mut handle) => handle.close(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ResolvedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSource")
            .field("strategy", &self.strategy)
            .field("descriptor", &self.descriptor)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Drop for ResolvedSource {
    fn drop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            tracing::warn!(descriptor = ?self.descriptor, "resolved source dropped while open");
            if let Err(e) = handle.close() {
                tracing::warn!("closing dropped source failed: {}", e);
            }
        }
    }
}
