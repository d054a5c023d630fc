//! Category registry
//!
//! A fixed, ordered table of category definitions. Built once at startup and
//! shared read-only afterwards (wrap it in an `Arc`; no locking needed).

use crate::error::{RegistryError, Result};
use crate::settings::CatalogConfig;
use std::collections::HashSet;
use tonebox_core::CategoryDefinition;
use tracing::debug;

/// Ordered, non-empty set of uniquely named categories
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    definitions: Vec<CategoryDefinition>,
}

impl CategoryRegistry {
    /// Build a registry from explicit definitions
    ///
    /// # Errors
    /// `Empty` for no definitions, `DuplicateCategory` when two share a name
    pub fn new(definitions: Vec<CategoryDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for definition in &definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(RegistryError::DuplicateCategory(definition.name.clone()));
            }
        }

        Ok(Self { definitions })
    }

    /// Build a registry from configuration, applying its filter policy
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut locations = HashSet::new();
        for location in &config.locations {
            if !locations.insert(location.name.as_str()) {
                return Err(RegistryError::DuplicateLocation(location.name.clone()));
            }
        }

        let definitions = config
            .categories
            .iter()
            .map(|settings| {
                let location = config.location(&settings.location).ok_or_else(|| {
                    RegistryError::UnknownLocation {
                        category: settings.name.clone(),
                        location: settings.location.clone(),
                    }
                })?;

                let filter = config.filters.build(settings.filter.as_ref());
                debug!(category = %settings.name, filter = ?filter, "registered category");

                Ok(CategoryDefinition {
                    name: settings.name.clone(),
                    location: location.clone(),
                    filter,
                    sort: settings.sort.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(definitions)
    }

    /// All definitions, in configured order
    pub fn definitions(&self) -> &[CategoryDefinition] {
        &self.definitions
    }

    /// Look up a definition by name
    pub fn get(&self, name: &str) -> Option<&CategoryDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Never true for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
