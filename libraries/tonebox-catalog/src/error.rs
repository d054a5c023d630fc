//! Error types for catalog configuration

use thiserror::Error;

/// Registry construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No categories configured
    #[error("No categories configured")]
    Empty,

    /// Two categories share a name
    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),

    /// Two locations share a name
    #[error("Duplicate store location: {0}")]
    DuplicateLocation(String),

    /// A category names a location that is not declared
    #[error("Category {category} refers to unknown location {location}")]
    UnknownLocation { category: String, location: String },

    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<::config::ConfigError> for RegistryError {
    fn from(err: ::config::ConfigError) -> Self {
        RegistryError::Config(err.to_string())
    }
}

impl From<RegistryError> for tonebox_core::ToneboxError {
    fn from(err: RegistryError) -> Self {
        tonebox_core::ToneboxError::config(err.to_string())
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
