//! Common test helpers for integration tests
//!
//! Provides an isolated project directory to write source files into and
//! shortcuts for running the detector over them.

#![allow(dead_code)]

use anyhow::Result;
use numlint::{Detector, DetectorConfig, DetectorEvent, Finding, RunReport};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// `testFile.js`: a mix of named constants, object literals and bare literals
pub const MIXED_FIXTURE: &str = r#"var Promise = require('bluebird');

var MINUTE = 60;
var HOUR = 3600;

const DAY = 86400;

var configObject = {
  key: 90,
  another: 10 * 10,
  10: 'an "integer" key'
};

function getSecondsInDay() {
  return 24 * HOUR;
}

function getMillisecondsInDay() {
  // Some stylish code
  return (getSecondsInDay() *
    (1000)
  );
}

function callSetTimeoutZero(func) {
  setTimeout(func, 0);
}

function invokeInTen(func) {
  setTimeout(func, 10);
}
"#;

/// Temporary project directory
///
/// Each TestProject creates a unique temporary directory that is removed
/// when the TestProject is dropped.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Get path to the temporary project directory
    pub fn project_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file in the project directory
    ///
    /// # Arguments
    ///
    /// * `relative_path` - Path relative to project_dir (e.g., "app.js", "src/time.ts")
    /// * `content` - File content
    pub fn create_file(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write `content` to `relative_path` and scan just that file
    pub async fn scan_source(
        &self,
        relative_path: &str,
        content: &str,
        config: DetectorConfig,
    ) -> Result<Vec<Finding>> {
        let path = self.create_file(relative_path, content)?;
        let report = scan(vec![path], config).await?;
        Ok(report.findings)
    }
}

/// Run a detector over `paths` and gather its findings
pub async fn scan(paths: Vec<PathBuf>, config: DetectorConfig) -> Result<RunReport> {
    Ok(Detector::new(paths, config).collect().await?)
}

/// Run a detector and return every event it emitted, plus its result
pub async fn scan_events(
    paths: Vec<PathBuf>,
    config: DetectorConfig,
) -> (Vec<DetectorEvent>, Result<numlint::RunSummary, numlint::DetectError>) {
    let (tx, rx) = async_channel::unbounded();
    let result = Detector::new(paths, config).run(&tx).await;
    drop(tx);

    let mut events = Vec::new();
    while let Ok(event) = rx.recv().await {
        events.push(event);
    }
    (events, result)
}

/// Raw spelling of every finding's value
pub fn raw_values(findings: &[Finding]) -> Vec<String> {
    findings.iter().map(|f| f.value.raw().to_string()).collect()
}

/// `(line, raw value)` for every finding, sorted
pub fn locations(findings: &[Finding]) -> Vec<(usize, String)> {
    let mut locations: Vec<(usize, String)> = findings
        .iter()
        .map(|f| (f.line_number, f.value.raw().to_string()))
        .collect();
    locations.sort();
    locations
}
