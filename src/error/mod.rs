//! Error types for the embedder crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for embedder operations
pub type Result<T> = std::result::Result<T, EmbedderError>;

/// Main error type for provider registration, configuration and embedding
#[derive(Error, Debug)]
pub enum EmbedderError {
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    #[error("Unsupported provider: {0}")]
    UnknownProvider(String),

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[source] Box<EmbedderError>),

    #[error("Dimension detection failed: {0}")]
    DimensionDetection(#[source] Box<EmbedderError>),

    #[error("Embedding failed at index {index} ({preview:?}): {source}")]
    EmbedItem {
        index: usize,
        preview: String,
        #[source]
        source: Box<EmbedderError>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl EmbedderError {
    /// Wrap a failed liveness probe
    pub fn unavailable(source: EmbedderError) -> Self {
        EmbedderError::BackendUnavailable(Box::new(source))
    }

    /// Wrap a failed dimension probe
    pub fn dimension_detection(source: EmbedderError) -> Self {
        EmbedderError::DimensionDetection(Box::new(source))
    }
}

impl From<serde_json::Error> for EmbedderError {
    fn from(err: serde_json::Error) -> Self {
        EmbedderError::InvalidResponse(err.to_string())
    }
}
