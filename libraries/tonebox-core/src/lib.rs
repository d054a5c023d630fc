//! Tonebox Core
//!
//! Shared vocabulary for the Tonebox audio catalog: the data model, the error
//! taxonomy, and the capability traits through which the platform content
//! store, the stream opener and the audio sink are injected.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `CategoryDefinition`, `CatalogEntry`, `ResolvedSource`, ...
//! - **Capabilities**: `ContentStore`, `SourceOpener`, `PlaybackSink`
//! - **Error Handling**: `QueryError`, `ResolutionError`, `PlaybackError`
//!   and the umbrella `ToneboxError`
//!
//! Nothing in this crate touches a real store or device. Concrete adapters live
//! in `tonebox-storage`; tests substitute fakes.
//!
//! # Example
//!
//! ```rust
//! use tonebox_core::types::{CatalogEntry, ContentRef, StoreLocation};
//!
//! let internal = StoreLocation::new("internal", "content://media/internal/audio/media");
//! let reference = internal.item_reference(7);
//! assert_eq!(reference.as_str(), "content://media/internal/audio/media/7");
//!
//! let entry = CatalogEntry::new(7, "Bell.ogg", reference, "internal");
//! assert!(entry.content_ref.is_store_reference());
//! # let _ = ContentRef::new("/sdcard/Ringtones/bell.ogg");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod fields;
pub mod traits;
pub mod types;

pub use error::{
    FieldError, OpenError, PlaybackError, QueryError, ResolutionError, Result, SinkError,
    StoreError, ToneboxError,
};
pub use traits::{
    ContentStore, PlaybackSink, SignalTarget, SinkNotifier, SourceOpener, StreamHandle,
};
pub use types::{
    CatalogEntry, CategoryDefinition, ContentRef, EntryId, FieldValue, FilterPredicate,
    ResolvedSource, SessionId, SessionState, SortDirection, SortField, SortRule,
    SourceDescriptor, StoreLocation, StoreQuery, StoreRow, StrategyKind,
};
