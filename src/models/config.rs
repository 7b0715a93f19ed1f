//! Detector configuration
//!
//! Loaded from an optional JSON file and merged with command line flags.
//! Shared read-only across every file task of a run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Classification policy for a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DetectorConfig {
    /// Only literals bound with `const` are exempt
    pub enforce_const: bool,
    /// Report literals inside object literals and property assignments
    pub detect_objects: bool,
    /// Values never reported
    pub ignore: Vec<f64>,
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enforce_const(mut self, enforce_const: bool) -> Self {
        self.enforce_const = enforce_const;
        self
    }

    pub fn with_detect_objects(mut self, detect_objects: bool) -> Self {
        self.detect_objects = detect_objects;
        self
    }

    pub fn with_ignore(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.ignore.extend(values);
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to a JSON document with `enforceConst`, `detectObjects`
    ///   and `ignore` keys, all optional
    ///
    /// # Returns
    /// * `Ok(DetectorConfig)` with missing keys defaulted
    /// * `Err(ConfigError)` if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), ?config, "loaded detector config");
        Ok(config)
    }

    pub fn is_ignored_value(&self, value: f64) -> bool {
        self.ignore.iter().any(|ignored| *ignored == value)
    }
}
