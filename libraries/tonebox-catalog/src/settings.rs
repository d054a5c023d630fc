/// Catalog configuration
use crate::error::Result;
use crate::filters::{FilterPolicy, FilterSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tonebox_core::{fields, SortRule, StoreLocation};

pub const INTERNAL_LOCATION: &str = "internal";
pub const EXTERNAL_LOCATION: &str = "external";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_locations")]
    pub locations: Vec<StoreLocation>,

    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySettings>,

    #[serde(default)]
    pub filters: FilterPolicy,
}

/// One configured category
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategorySettings {
    pub name: String,

    /// Name of a declared store location
    pub location: String,

    #[serde(default)]
    pub filter: Option<FilterSpec>,

    #[serde(default)]
    pub sort: Option<SortRule>,
}

impl CategorySettings {
    fn flagged(name: &str, location: &str, flag: &str) -> Self {
        Self {
            name: name.to_string(),
            location: location.to_string(),
            filter: Some(FilterSpec::Flag {
                flag: flag.to_string(),
            }),
            sort: None,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            categories: default_categories(),
            filters: FilterPolicy::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `TONEBOX_` and use `__` to
    /// descend into tables, e.g. `TONEBOX_FILTERS__MISSING=no_rows`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = ::config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(::config::File::from(path));
        }

        settings = settings.add_source(
            ::config::Environment::with_prefix("TONEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::from_str(source, ::config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn location(&self, name: &str) -> Option<&StoreLocation> {
        self.locations.iter().find(|l| l.name == name)
    }
}

// Default values
fn default_locations() -> Vec<StoreLocation> {
    vec![
        StoreLocation::new(INTERNAL_LOCATION, "content://media/internal/audio/media"),
        StoreLocation::new(EXTERNAL_LOCATION, "content://media/external/audio/media"),
    ]
}

fn default_categories() -> Vec<CategorySettings> {
    vec![
        CategorySettings::flagged("Ringtones", INTERNAL_LOCATION, fields::IS_RINGTONE),
        CategorySettings::flagged("Notifications", INTERNAL_LOCATION, fields::IS_NOTIFICATION),
        CategorySettings {
            name: "mp3".to_string(),
            location: EXTERNAL_LOCATION.to_string(),
            filter: Some(FilterSpec::Extension {
                extension: "mp3".to_string(),
            }),
            sort: None,
        },
        CategorySettings::flagged("Musics", EXTERNAL_LOCATION, fields::IS_MUSIC),
    ]
}
