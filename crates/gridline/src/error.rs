//! Error types.
//!
//! Measuring and formatting never fail. [`GridError`] covers the edges that
//! can: writing to a sink, reading input data and parsing configuration.

use std::io;

use thiserror::Error;

/// Error type for table I/O, ingestion and configuration.
#[derive(Debug, Error)]
pub enum GridError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A YAML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON document (configuration or data) could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV input could not be read.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A named option (style, alignment, policy) was not recognised.
    #[error("unknown {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

impl GridError {
    /// Create an invalid-value error.
    pub fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        GridError::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for fallible table operations.
pub type Result<T> = std::result::Result<T, GridError>;
