//! Error types for the demodata tools.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, transforming or saving the dataset.
#[derive(Error, Debug)]
pub enum DemoDataError {
    #[error("Events file not found at {}", .0.display())]
    EventsFileNotFound(PathBuf),

    #[error("Invalid events document: {0}")]
    InvalidDocument(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for DemoDataError {
    fn from(err: config::ConfigError) -> Self {
        DemoDataError::Config(err.to_string())
    }
}

/// Result type alias for demodata operations.
pub type DemoDataResult<T> = Result<T, DemoDataError>;
