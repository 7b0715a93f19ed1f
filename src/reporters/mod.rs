//! Output reporters
//!
//! A reporter turns detector events into text. [`report`] drains an event
//! channel and writes each rendering as it arrives.

pub mod detailed;
pub mod json;
pub mod simple;

use std::io::{self, Write};
use std::str::FromStr;

use crate::models::Finding;
use crate::scanner::DetectorEvent;

pub use detailed::DetailedReporter;
pub use json::JsonReporter;
pub use simple::SimpleReporter;

/// Renders detector events as text
pub trait Reporter: Send {
    /// Text written when the run starts
    fn render_start(&mut self) -> String {
        String::new()
    }

    fn render_finding(&mut self, finding: &Finding) -> String;

    /// Text written after the last finding of a successful run
    fn render_summary(&mut self, file_count: usize, finding_count: usize) -> String;
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterKind {
    Simple,
    #[default]
    Detailed,
    Json,
}

impl ReporterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReporterKind::Simple => "simple",
            ReporterKind::Detailed => "detailed",
            ReporterKind::Json => "json",
        }
    }

    /// Build the reporter for this format
    ///
    /// `color` only affects the detailed reporter.
    pub fn build(&self, color: bool) -> Box<dyn Reporter> {
        match self {
            ReporterKind::Simple => Box::new(SimpleReporter::new()),
            ReporterKind::Detailed => Box::new(DetailedReporter::new(color)),
            ReporterKind::Json => Box::new(JsonReporter::new()),
        }
    }
}

impl FromStr for ReporterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(ReporterKind::Simple),
            "detailed" => Ok(ReporterKind::Detailed),
            "json" => Ok(ReporterKind::Json),
            other => Err(format!(
                "unknown reporter '{}', expected simple, detailed or json",
                other
            )),
        }
    }
}

/// Summary line shared by the text reporters
pub(crate) fn summary_line(file_count: usize, finding_count: usize) -> String {
    if finding_count == 0 {
        format!("No magic numbers found across {} file(s)\n", file_count)
    } else {
        format!(
            "\n{} magic number(s) found across {} file(s)\n",
            finding_count, file_count
        )
    }
}

/// Write every event from `events` through `reporter`
///
/// Returns once `End` was rendered or the channel closed; a closed channel
/// without `End` means the run failed and no summary is written.
///
/// # Returns
/// * `Ok(count)` - Number of findings written
/// * `Err(...)` if writing fails
pub async fn report<R, W>(
    events: async_channel::Receiver<DetectorEvent>,
    reporter: &mut R,
    writer: &mut W,
) -> io::Result<usize>
where
    R: Reporter + ?Sized,
    W: Write,
{
    let mut found = 0;

    while let Ok(event) = events.recv().await {
        let text = match event {
            DetectorEvent::Start => reporter.render_start(),
            DetectorEvent::Found(finding) => {
                found += 1;
                reporter.render_finding(&finding)
            }
            DetectorEvent::End { file_count } => {
                let text = reporter.render_summary(file_count, found);
                writer.write_all(text.as_bytes())?;
                break;
            }
        };
        writer.write_all(text.as_bytes())?;
    }

    writer.flush()?;
    Ok(found)
}
