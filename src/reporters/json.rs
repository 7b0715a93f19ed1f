//! JSON array output
//!
//! The array is streamed: `[` on start, one object per finding, `]` at the
//! end of a successful run.

use serde::Serialize;

use super::Reporter;
use crate::models::{Finding, NumericValue};

/// Wire form of a finding; context lines are joined into one string
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFinding<'a> {
    value: &'a NumericValue,
    file: &'a str,
    file_length: usize,
    line_number: usize,
    line_source: &'a str,
    start_column: usize,
    end_column: usize,
    context: String,
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    fn from(finding: &'a Finding) -> Self {
        Self {
            value: &finding.value,
            file: &finding.file,
            file_length: finding.file_length,
            line_number: finding.line_number,
            line_source: &finding.line_source,
            start_column: finding.start_column,
            end_column: finding.end_column,
            context: finding.context_lines.join("\n"),
        }
    }
}

#[derive(Debug, Default)]
pub struct JsonReporter {
    found: usize,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for JsonReporter {
    fn render_start(&mut self) -> String {
        "[".to_string()
    }

    fn render_finding(&mut self, finding: &Finding) -> String {
        let separator = if self.found > 0 { ",\n" } else { "" };
        self.found += 1;

        match serde_json::to_string(&JsonFinding::from(finding)) {
            Ok(json) => format!("{}{}", separator, json),
            Err(e) => {
                tracing::error!(error = %e, file = %finding.file, "failed to serialize finding");
                String::new()
            }
        }
    }

    fn render_summary(&mut self, _file_count: usize, _finding_count: usize) -> String {
        "]\n".to_string()
    }
}
