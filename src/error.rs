//! Detector error types

use std::path::PathBuf;

/// Errors that terminate a detector run
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// Input rejected before any file was touched
    #[error("{0}")]
    Validation(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("File task failed: {0}")]
    Task(String),

    #[error("Event receiver dropped before the run finished")]
    EventsClosed,
}

impl DetectError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DetectError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before the run started
    pub fn is_validation(&self) -> bool {
        matches!(self, DetectError::Validation(_))
    }
}
