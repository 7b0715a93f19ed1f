//! Ignore directives
//!
//! Comments can switch detection off for a single line or a block of lines:
//!
//! ```text
//! var timeout = setTimeout(fn, 500); // numlint ignore:line
//!
//! // ignore:start
//! var grid = [[1, 0], [0, 1]];
//! // ignore:end
//! ```
//!
//! Markers are matched as plain substrings anywhere in the comment text.

use std::collections::BTreeSet;

use crate::models::Comment;

pub const IGNORE_LINE: &str = "ignore:line";
pub const IGNORE_START: &str = "ignore:start";
pub const IGNORE_END: &str = "ignore:end";

/// Lines and inclusive line ranges where findings are suppressed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreDirectives {
    lines: BTreeSet<usize>,
    ranges: Vec<(usize, usize)>,
}

impl IgnoreDirectives {
    /// Scan a file's comments in source order
    pub fn from_comments<'a>(comments: impl IntoIterator<Item = &'a Comment>) -> Self {
        let mut scanner = DirectiveScanner::new();
        for comment in comments {
            scanner.observe(comment);
        }
        scanner.finish()
    }

    pub fn is_suppressed(&self, line: usize) -> bool {
        self.lines.contains(&line)
            || self
                .ranges
                .iter()
                .any(|&(start, end)| start <= line && line <= end)
    }

    pub fn lines(&self) -> &BTreeSet<usize> {
        &self.lines
    }

    pub fn ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.ranges.is_empty()
    }
}

/// Incremental builder fed one comment at a time as the parser reports them
#[derive(Debug, Default)]
pub struct DirectiveScanner {
    directives: IgnoreDirectives,
    pending_start: Option<usize>,
}

impl DirectiveScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, comment: &Comment) {
        let line = comment.span.end.line;
        let text = comment.text.as_str();

        if text.contains(IGNORE_LINE) {
            self.directives.lines.insert(line);
        }

        if text.contains(IGNORE_START) && self.pending_start.is_none() {
            self.pending_start = Some(line);
        }

        if text.contains(IGNORE_END) {
            if let Some(start) = self.pending_start.take() {
                self.directives.ranges.push((start, line));
            }
        }
    }

    /// Finish scanning. A block left open produces no range.
    pub fn finish(self) -> IgnoreDirectives {
        if let Some(start) = self.pending_start {
            tracing::warn!(line = start, "unterminated {} directive ignored", IGNORE_START);
        }
        self.directives
    }
}
