//! Tonebox - Catalog
//!
//! The listing half of Tonebox:
//! - Category registry (fixed at startup, validated)
//! - Filter-construction policies (extension matching, absent filters)
//! - Catalog configuration (TOML file + `TONEBOX_` environment overrides)
//! - Catalog query engine (definition -> store query -> ordered entries)
//!
//! The store itself is injected as an `Arc<dyn ContentStore>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tonebox_catalog::{CatalogConfig, CatalogQueryEngine, CategoryRegistry};
//! use tonebox_core::ContentStore;
//!
//! # async fn example(store: Arc<dyn ContentStore>) -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CategoryRegistry::from_config(&CatalogConfig::load(None)?)?;
//! let engine = CatalogQueryEngine::new(store);
//!
//! if let Some(ringtones) = registry.get("Ringtones") {
//!     for entry in engine.query(ringtones).await? {
//!         println!("{} -> {}", entry.display_name, entry.content_ref);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
pub mod filters;
mod registry;
mod settings;

pub use engine::{CatalogQueryEngine, QueryDiagnostics};
pub use error::{RegistryError, Result};
pub use filters::{ExtensionMatch, FilterPolicy, FilterSpec, MissingFilter};
pub use registry::CategoryRegistry;
pub use settings::{CatalogConfig, CategorySettings, EXTERNAL_LOCATION, INTERNAL_LOCATION};
