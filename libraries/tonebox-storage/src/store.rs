use crate::error::StorageError;
use crate::media;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tonebox_core::{
    ContentRef, ContentStore, EntryId, StoreError, StoreLocation, StoreQuery, StoreRow,
};
use tracing::debug;

/// `SQLite`-backed content store
///
/// Serves category queries and the secondary reference-to-path lookup. The
/// locations it knows decide which references it can resolve.
#[derive(Clone)]
pub struct SqliteContentStore {
    pool: SqlitePool,
    locations: Vec<StoreLocation>,
}

impl SqliteContentStore {
    pub fn new(pool: SqlitePool, locations: Vec<StoreLocation>) -> Self {
        Self { pool, locations }
    }

    /// Get the underlying database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn locations(&self) -> &[StoreLocation] {
        &self.locations
    }

    /// Location and row id a reference was minted from
    fn locate(&self, reference: &ContentRef) -> Option<(&StoreLocation, EntryId)> {
        self.locations.iter().find_map(|location| {
            location
                .parse_item_reference(reference)
                .map(|id| (location, id))
        })
    }
}

#[async_trait]
impl ContentStore for SqliteContentStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<StoreRow>, StoreError> {
        let rows = media::query(&self.pool, query).await?;
        debug!(volume = %query.location.name, rows = rows.len(), "audio_media query");
        Ok(rows)
    }

    async fn resolve_path(&self, reference: &ContentRef) -> Result<PathBuf, StoreError> {
        let (location, id) = self
            .locate(reference)
            .ok_or_else(|| StorageError::ForeignReference(reference.to_string()))?;

        let path = media::get_path(&self.pool, &location.name, id).await?;
        debug!(reference = %reference, path = %path, "Resolved reference to path");
        Ok(PathBuf::from(path))
    }
}
