//! Tonebox - Playback
//!
//! Turns a catalog entry into sound:
//! - Source resolver: a fixed, ordered cascade of resolution strategies
//! - Playback session manager: at most one active session, release-before-bind
//! - Playback events: state changes and sink errors on a broadcast channel
//!
//! # Architecture
//!
//! `tonebox-playback` never touches a real store, file or device. The content
//! store, the stream opener and the audio sink are injected capabilities from
//! `tonebox-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tonebox_core::{CatalogEntry, ContentStore, PlaybackSink, SourceOpener};
//! use tonebox_playback::{PlaybackEvent, PlaybackSessionManager, SourceResolver};
//!
//! # async fn example(
//! #     store: Arc<dyn ContentStore>,
//! #     opener: Arc<dyn SourceOpener>,
//! #     sink: Box<dyn PlaybackSink>,
//! #     entry: CatalogEntry,
//! # ) {
//! let manager = PlaybackSessionManager::new(SourceResolver::new(store, opener), sink);
//! let mut events = manager.subscribe();
//!
//! if let Err(e) = manager.play(&entry).await {
//!     eprintln!("couldn't play this item: {e}");
//! }
//!
//! while let Ok(event) = events.recv().await {
//!     if let PlaybackEvent::Error { error, .. } = event {
//!         eprintln!("playback failed: {error}");
//!     }
//! }
//! # }
//! ```

mod events;
mod resolver;
mod session;
pub mod strategies;

pub use events::PlaybackEvent;
pub use resolver::SourceResolver;
pub use session::PlaybackSessionManager;
pub use strategies::StepError;
