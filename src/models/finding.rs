use serde::Serialize;

use super::syntax::NumericValue;

/// A magic number reported by the detector
///
/// Columns are 0-indexed byte offsets into `line_source`, already corrected
/// for any parenthesis the parser folded into the literal's span.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub value: NumericValue,
    pub file: String,
    pub file_length: usize,
    pub line_number: usize,
    pub line_source: String,
    pub start_column: usize,
    pub end_column: usize,
    pub context_lines: Vec<String>,
    pub context_index: usize,
}

impl Finding {
    /// The literal's own line as it appears inside `context_lines`
    pub fn context_line(&self) -> Option<&str> {
        self.context_lines.get(self.context_index).map(String::as_str)
    }

    /// `file:line` location string
    pub fn location(&self) -> String {
        format!("{}:{}", self.file, self.line_number)
    }
}
