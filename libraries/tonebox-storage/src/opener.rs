//! Filesystem source opener

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tonebox_core::{ContentRef, ContentStore, OpenError, SourceOpener, StoreError, StreamHandle};
use tracing::debug;

/// Opens local files for playback
///
/// Without a store, `content://` references are refused and the resolution
/// cascade reaches their bytes through the path lookup instead. With one,
/// `open_reference` looks the reference up itself.
#[derive(Clone, Default)]
pub struct FsSourceOpener {
    store: Option<Arc<dyn ContentStore>>,
}

impl fmt::Debug for FsSourceOpener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsSourceOpener")
            .field("store_backed", &self.store.is_some())
            .finish()
    }
}

impl FsSourceOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opener that also serves store references, via `store`'s path lookup
    pub fn with_store(store: Arc<dyn ContentStore>) -> Self {
        Self { store: Some(store) }
    }

    async fn reference_path(&self, reference: &ContentRef) -> Result<PathBuf, OpenError> {
        if let Some(path) = reference.as_path() {
            return Ok(path);
        }
        match &self.store {
            Some(store) if reference.is_store_reference() => {
                store.resolve_path(reference).await.map_err(lookup_failed)
            }
            _ => Err(OpenError::Unsupported(reference.to_string())),
        }
    }

    async fn open_file(path: &Path, keep_descriptor: bool) -> Result<FileHandle, OpenError> {
        let file = File::open(path).await?;
        if !file.metadata().await?.is_file() {
            return Err(OpenError::Unsupported(path.display().to_string()));
        }
        debug!(path = %path.display(), keep_descriptor, "Opened file");
        Ok(FileHandle {
            file: Some(file),
            keep_descriptor,
        })
    }
}

#[async_trait]
impl SourceOpener for FsSourceOpener {
    async fn open_reference(
        &self,
        reference: &ContentRef,
    ) -> Result<Box<dyn StreamHandle>, OpenError> {
        let path = self.reference_path(reference).await?;
        Ok(Box::new(Self::open_file(&path, false).await?))
    }

    async fn open_path(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError> {
        Ok(Box::new(Self::open_file(path, false).await?))
    }

    async fn open_descriptor(&self, path: &Path) -> Result<Box<dyn StreamHandle>, OpenError> {
        Ok(Box::new(Self::open_file(path, true).await?))
    }
}

fn lookup_failed(err: StoreError) -> OpenError {
    let kind = match err {
        StoreError::NotFound(_) => io::ErrorKind::NotFound,
        _ => io::ErrorKind::Other,
    };
    OpenError::Io(io::Error::new(kind, err.to_string()))
}

/// An open local file
struct FileHandle {
    file: Option<File>,
    keep_descriptor: bool,
}

impl StreamHandle for FileHandle {
    fn close(&mut self) -> Result<(), OpenError> {
        // Dropping the tokio file closes it
        drop(self.file.take());
        Ok(())
    }

    #[cfg(unix)]
    fn raw_descriptor(&self) -> Option<i32> {
        use std::os::unix::io::AsRawFd;
        if !self.keep_descriptor {
            return None;
        }
        self.file.as_ref().map(|f| f.as_raw_fd())
    }
}
