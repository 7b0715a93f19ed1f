//! One line per finding: location and the offending source line

use super::{summary_line, Reporter};
use crate::models::Finding;

#[derive(Debug, Default)]
pub struct SimpleReporter;

impl SimpleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SimpleReporter {
    fn render_finding(&mut self, finding: &Finding) -> String {
        format!("{} | {}\n", finding.location(), finding.line_source)
    }

    fn render_summary(&mut self, file_count: usize, finding_count: usize) -> String {
        summary_line(file_count, finding_count)
    }
}
