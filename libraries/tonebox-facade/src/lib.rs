//! Tonebox - Catalog Facade
//!
//! The single surface a UI talks to: list the entries of a named category,
//! play an entry, stop. Everything behind it (registry, query engine,
//! resolver, session manager) is wired here from injected capabilities.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tonebox_catalog::{CatalogConfig, CategoryRegistry};
//! use tonebox_core::{ContentStore, PlaybackSink, SourceOpener};
//! use tonebox_facade::CatalogFacade;
//!
//! # async fn example(
//! #     store: Arc<dyn ContentStore>,
//! #     opener: Arc<dyn SourceOpener>,
//! #     sink: Box<dyn PlaybackSink>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CategoryRegistry::from_config(&CatalogConfig::default())?;
//! let facade = CatalogFacade::new(registry, store, opener, sink);
//!
//! let ringtones = facade.list_entries("Ringtones").await?;
//! if let Some(first) = ringtones.first() {
//!     facade.play(first).await?;
//! }
//! facade.stop().await;
//! # Ok(())
//! # }
//! ```

mod facade;

pub use facade::CatalogFacade;
