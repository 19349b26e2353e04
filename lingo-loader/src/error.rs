//! Error types for message loading

use thiserror::Error;

/// Errors raised while reading a message source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON5 parse error
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Message file with an extension that cannot be read
    #[error("Unsupported message format: {0}")]
    UnsupportedFormat(String),

    /// Failure reported by a custom source
    #[error("Source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
