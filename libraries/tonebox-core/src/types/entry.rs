//! Catalog entries and content references

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Row id, unique only within the originating store location
pub type EntryId = i64;

const STORE_SCHEME: &str = "content://";
const FILE_SCHEME: &str = "file://";

/// Opaque locator of a row's bytes
///
/// Only the source resolver interprets it. A `content://` value is a store
/// reference; anything else is treated as a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for references that need the store to reach their bytes
    pub fn is_store_reference(&self) -> bool {
        self.0.starts_with(STORE_SCHEME)
    }

    /// The raw filesystem path, if this is not a store reference
    pub fn as_path(&self) -> Option<PathBuf> {
        if self.is_store_reference() {
            return None;
        }
        let raw = self.0.strip_prefix(FILE_SCHEME).unwrap_or(&self.0);
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a category listing
///
/// Produced fresh by every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub display_name: String,
    /// Store title column, when the store has one
    pub title: Option<String>,
    /// Absent for locations that do not track it
    pub date_added: Option<DateTime<Utc>>,
    pub content_ref: ContentRef,
    /// Name of the location the row was read from
    pub location: String,
}

impl CatalogEntry {
    pub fn new(
        id: EntryId,
        display_name: impl Into<String>,
        content_ref: ContentRef,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            title: None,
            date_added: None,
            content_ref,
            location: location.into(),
        }
    }
}
