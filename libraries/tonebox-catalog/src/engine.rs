//! Catalog query engine
//!
//! Turns a category definition into a store query, runs it, and maps the rows
//! to catalog entries. Rows missing an id or a display name are skipped and
//! counted; they never fail the listing.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tonebox_core::{
    fields, CatalogEntry, CategoryDefinition, ContentStore, FieldError, QueryError, StoreLocation,
    StoreQuery, StoreRow,
};
use tracing::{debug, info, warn};

/// Snapshot of the engine's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryDiagnostics {
    /// Queries executed (successful or not)
    pub queries: u64,
    /// Rows returned by the store
    pub rows_seen: u64,
    /// Rows dropped for missing required fields
    pub rows_skipped: u64,
}

#[derive(Debug, Default)]
struct Counters {
    queries: AtomicU64,
    rows_seen: AtomicU64,
    rows_skipped: AtomicU64,
}

/// Executes category queries against an injected content store
///
/// Cheap to clone; clones share the store and the counters.
#[derive(Clone)]
pub struct CatalogQueryEngine {
    store: Arc<dyn ContentStore>,
    counters: Arc<Counters>,
}

impl CatalogQueryEngine {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            counters: Arc::new(Counters::default()),
        }
    }

    /// The store query a definition translates to
    pub fn build_query(definition: &CategoryDefinition) -> StoreQuery {
        let mut projection = vec![fields::ID, fields::DISPLAY_NAME, fields::TITLE];
        if definition.location.tracks_date_added {
            projection.push(fields::DATE_ADDED);
        }

        StoreQuery {
            location: definition.location.clone(),
            projection,
            filter: definition.filter.clone(),
            sort: Some(definition.sort),
        }
    }

    /// List the entries of a category, ordered by its sort rule
    ///
    /// # Errors
    /// `StoreUnavailable` if the store cannot be reached, `InvalidDefinition`
    /// if the store rejects the filter. Neither is retried here.
    pub async fn query(
        &self,
        definition: &CategoryDefinition,
    ) -> Result<Vec<CatalogEntry>, QueryError> {
        let query = Self::build_query(definition);
        self.counters.queries.fetch_add(1, Ordering::Relaxed);

        let rows = self.store.query(&query).await.map_err(|e| {
            warn!(category = %definition.name, "Category query failed: {}", e);
            QueryError::from(e)
        })?;

        self.counters
            .rows_seen
            .fetch_add(rows.len() as u64, Ordering::Relaxed);

        let mut entries = Vec::with_capacity(rows.len());
        let mut skipped = 0u64;
        for row in &rows {
            match map_row(row, &definition.location) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    skipped += 1;
                    debug!(category = %definition.name, "Skipping row: {}", e);
                }
            }
        }

        if skipped > 0 {
            self.counters
                .rows_skipped
                .fetch_add(skipped, Ordering::Relaxed);
        }

        info!(
            category = %definition.name,
            location = %definition.location.name,
            "Found {} entries ({} rows skipped)",
            entries.len(),
            skipped
        );

        Ok(entries)
    }

    pub fn diagnostics(&self) -> QueryDiagnostics {
        QueryDiagnostics {
            queries: self.counters.queries.load(Ordering::Relaxed),
            rows_seen: self.counters.rows_seen.load(Ordering::Relaxed),
            rows_skipped: self.counters.rows_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Map one row, addressing it under the location it was read from
fn map_row(row: &StoreRow, location: &StoreLocation) -> Result<CatalogEntry, FieldError> {
    let id = row.get_i64(fields::ID)?;
    let display_name = row.get_str(fields::DISPLAY_NAME)?;
    if display_name.trim().is_empty() {
        return Err(FieldError::NotFound(fields::DISPLAY_NAME.to_string()));
    }

    let date_added = if location.tracks_date_added {
        row.opt_i64(fields::DATE_ADDED)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    } else {
        None
    };

    Ok(CatalogEntry {
        id,
        display_name: display_name.to_string(),
        title: row.opt_str(fields::TITLE).map(str::to_string),
        date_added,
        content_ref: location.item_reference(id),
        location: location.name.clone(),
    })
}
