//! Detector run orchestration
//!
//! A [`Detector`] processes every file of a run concurrently and publishes
//! its progress on an event channel:
//!
//! * `Start` once the input is validated
//! * `Found` for every reportable literal, in document order within a file
//! * `End` after all files succeeded
//!
//! Files complete in any order. The first failing file ends the run: its error
//! is returned, the remaining file tasks are aborted, and `End` is never sent.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::DetectError;
use crate::models::{DetectorConfig, Finding, SourceFile};
use crate::scanner::javascript_scanner::JavaScriptScanner;
use crate::scanner::tree_sitter_utils::{CodeParser, SourceParser};

/// Progress events emitted by a run
#[derive(Debug, Clone, PartialEq)]
pub enum DetectorEvent {
    Start,
    Found(Finding),
    End { file_count: usize },
}

/// Totals of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub file_count: usize,
    pub finding_count: usize,
}

/// Findings and totals gathered by [`Detector::collect`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub findings: Vec<Finding>,
    pub summary: RunSummary,
}

/// Magic number detector over a fixed set of files
pub struct Detector<P = CodeParser> {
    file_paths: Vec<PathBuf>,
    config: Arc<DetectorConfig>,
    parser: Arc<P>,
}

impl Detector<CodeParser> {
    /// Create a detector using the tree-sitter parser
    pub fn new(file_paths: Vec<PathBuf>, config: DetectorConfig) -> Self {
        Self::with_parser(file_paths, config, CodeParser::new())
    }
}

impl<P: SourceParser + 'static> Detector<P> {
    /// Create a detector with a custom parser
    pub fn with_parser(file_paths: Vec<PathBuf>, config: DetectorConfig, parser: P) -> Self {
        Self {
            file_paths,
            config: Arc::new(config),
            parser: Arc::new(parser),
        }
    }

    fn validate(&self) -> Result<(), DetectError> {
        if self.file_paths.is_empty() {
            return Err(DetectError::Validation(
                "filePaths must be a non-empty list of paths".to_string(),
            ));
        }
        Ok(())
    }

    /// Run the detector, publishing events on `events`
    ///
    /// # Arguments
    /// * `events` - Channel receiving [`DetectorEvent`]s
    ///
    /// # Returns
    /// * `Ok(RunSummary)` after `End` was sent
    /// * `Err(DetectError::Validation)` before any event when no files were given
    /// * `Err(...)` for the first file that failed
    pub async fn run(
        &self,
        events: &async_channel::Sender<DetectorEvent>,
    ) -> Result<RunSummary, DetectError> {
        self.validate()?;

        tracing::debug!(files = self.file_paths.len(), "starting detector run");
        send(events, DetectorEvent::Start).await?;

        let mut tasks = JoinSet::new();
        for path in &self.file_paths {
            tasks.spawn(Self::process_file(
                path.clone(),
                Arc::clone(&self.config),
                Arc::clone(&self.parser),
                events.clone(),
            ));
        }

        let mut finding_count = 0;
        while let Some(joined) = tasks.join_next().await {
            let result = joined.map_err(|e| DetectError::Task(e.to_string()))?;
            match result {
                Ok(found) => finding_count += found,
                Err(e) => {
                    tracing::debug!(error = %e, "aborting detector run");
                    return Err(e);
                }
            }
        }

        let summary = RunSummary {
            file_count: self.file_paths.len(),
            finding_count,
        };

        send(
            events,
            DetectorEvent::End {
                file_count: summary.file_count,
            },
        )
        .await?;

        tracing::debug!(
            files = summary.file_count,
            findings = summary.finding_count,
            "detector run finished"
        );

        Ok(summary)
    }

    /// Run the detector and gather every finding
    ///
    /// Findings of one file stay in document order; files appear in the order
    /// they completed.
    pub async fn collect(&self) -> Result<RunReport, DetectError> {
        let (tx, rx) = async_channel::unbounded();
        let summary = self.run(&tx).await?;
        drop(tx);

        let mut findings = Vec::with_capacity(summary.finding_count);
        while let Ok(event) = rx.try_recv() {
            if let DetectorEvent::Found(finding) = event {
                findings.push(finding);
            }
        }

        Ok(RunReport { findings, summary })
    }

    /// Read, parse and scan one file, forwarding its findings
    async fn process_file(
        path: PathBuf,
        config: Arc<DetectorConfig>,
        parser: Arc<P>,
        events: async_channel::Sender<DetectorEvent>,
    ) -> Result<usize, DetectError> {
        let content = read_source(&path).await?;

        let findings = tokio::task::spawn_blocking(move || {
            let source = SourceFile::new(path, content);
            let findings = JavaScriptScanner::analyze(parser.as_ref(), &source, &config);
            if let Ok(found) = &findings {
                tracing::debug!(
                    file = %source.path().display(),
                    findings = found.len(),
                    "scanned file"
                );
            }
            findings
        })
        .await
        .map_err(|e| DetectError::Task(e.to_string()))??;

        let count = findings.len();
        for finding in findings {
            send(&events, DetectorEvent::Found(finding)).await?;
        }

        Ok(count)
    }
}

async fn read_source(path: &Path) -> Result<String, DetectError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DetectError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn send(
    events: &async_channel::Sender<DetectorEvent>,
    event: DetectorEvent,
) -> Result<(), DetectError> {
    events
        .send(event)
        .await
        .map_err(|_| DetectError::EventsClosed)
}
