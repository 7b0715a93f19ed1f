use std::path::{Path, PathBuf};

/// A source file as handed to the parser and the detector
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    content: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Split `content` into lines on `\n`, dropping a trailing `\r` from each
    ///
    /// An empty file has a single empty line and a trailing newline yields a
    /// final empty line, so `line_count` matches what editors show.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();

        Self {
            path: path.into(),
            content,
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as shown in findings
    pub fn display_name(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line by 1-indexed line number
    pub fn line(&self, line_number: usize) -> Option<&str> {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// File extension, lowercased
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}
