/// Core error types for Tonebox
use thiserror::Error;

/// Result type alias using `ToneboxError`
pub type Result<T> = std::result::Result<T, ToneboxError>;

/// Failure to list a category
///
/// Neither variant is retried by the engine; the caller decides.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The content store could not be reached
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    /// The category's filter predicate was rejected by the store grammar
    #[error("Invalid category definition: {0}")]
    InvalidDefinition(String),

    /// No category is registered under this name
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Failure to turn a content reference into an open stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Every strategy in the cascade failed
    #[error("Unresolvable content reference {reference} ({attempts} strategies tried)")]
    Unresolvable { reference: String, attempts: usize },
}

/// Failure during a playback session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// The entry's reference could not be resolved
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The sink refused the resolved source
    #[error("Sink could not open source: {0}")]
    OpenFailed(String),

    /// The sink could not begin or finish preparation
    #[error("Sink preparation failed: {0}")]
    PrepareFailed(String),

    /// The sink was prepared but refused to start
    #[error("Sink start failed: {0}")]
    StartFailed(String),

    /// The sink reported an asynchronous error
    #[error("Sink error (code {0})")]
    SinkError(i32),
}

/// Errors reported by a content store capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be reached
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    /// The filter predicate does not parse in the store's grammar
    #[error("Malformed filter: {0}")]
    MalformedFilter(String),

    /// A secondary lookup found nothing for the reference
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedFilter(msg) => QueryError::InvalidDefinition(msg),
            StoreError::Unreachable(msg) | StoreError::NotFound(msg) => {
                QueryError::StoreUnavailable(msg)
            }
        }
    }
}

/// Row field access failure; the query engine treats it as "skip row"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field not found: {0}")]
    NotFound(String),

    #[error("Field {field} has unexpected type (expected {expected})")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// Failure to open a stream through a `SourceOpener`
#[derive(Error, Debug)]
pub enum OpenError {
    /// The opener does not handle this kind of locator
    #[error("Unsupported locator: {0}")]
    Unsupported(String),

    /// Access to the location was denied
    #[error("Access denied: {0}")]
    Denied(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Synchronous failure reported by a playback sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Open failed: {0}")]
    Open(String),

    #[error("Prepare failed: {0}")]
    Prepare(String),

    #[error("Start failed: {0}")]
    Start(String),
}

impl From<SinkError> for PlaybackError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::Open(msg) => PlaybackError::OpenFailed(msg),
            SinkError::Prepare(msg) => PlaybackError::PrepareFailed(msg),
            SinkError::Start(msg) => PlaybackError::StartFailed(msg),
        }
    }
}

/// Umbrella error for callers that do not care which side failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToneboxError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ResolutionError> for ToneboxError {
    fn from(err: ResolutionError) -> Self {
        Self::Playback(err.into())
    }
}

impl ToneboxError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short, user-facing description for the UI notification
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Query(_) => "couldn't load this category",
            Self::Playback(_) => "couldn't play this item",
            Self::Config(_) => "catalog is misconfigured",
        }
    }
}
