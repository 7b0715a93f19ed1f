//! Location, value and surrounding source lines for each finding
//!
//! With colour on, context is dimmed and the literal itself is highlighted.

use colored::Colorize;

use super::{summary_line, Reporter};
use crate::models::Finding;

#[derive(Debug)]
pub struct DetailedReporter {
    color: bool,
}

impl DetailedReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render_context(&self, finding: &Finding) -> String {
        if !self.color {
            return finding.context_lines.join("\n");
        }

        finding
            .context_lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                if idx == finding.context_index {
                    highlight(line, finding.start_column, finding.end_column)
                } else {
                    line.bright_black().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DetailedReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Dim `line` except for the byte range `start..end`, which is shown in red
fn highlight(line: &str, start: usize, end: usize) -> String {
    match (line.get(..start), line.get(start..end), line.get(end..)) {
        (Some(before), Some(literal), Some(after)) => format!(
            "{}{}{}",
            before.bright_black(),
            literal.red(),
            after.bright_black()
        ),
        _ => line.bright_black().to_string(),
    }
}

impl Reporter for DetailedReporter {
    fn render_finding(&mut self, finding: &Finding) -> String {
        format!(
            "\n{} | magic number: {}\n{}\n",
            finding.location(),
            finding.value,
            self.render_context(finding)
        )
    }

    fn render_summary(&mut self, file_count: usize, finding_count: usize) -> String {
        summary_line(file_count, finding_count)
    }
}
