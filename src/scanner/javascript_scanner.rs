//! JavaScript/TypeScript magic number scanner
//!
//! Applies the classifier to every numeric literal of one parsed file and
//! builds a [`Finding`] for each reportable one.

use crate::error::DetectError;
use crate::models::{DetectorConfig, Finding, Node, NumericValue, SourceFile, SyntaxTree};
use crate::rules::{Classification, Classifier, IgnoreDirectives};
use crate::scanner::tree_sitter_utils::SourceParser;
use crate::utils::{correct_columns, extract_context};

/// Per-file magic number scanner
pub struct JavaScriptScanner;

impl JavaScriptScanner {
    /// Parse and scan a single file
    ///
    /// # Arguments
    /// * `parser` - Parser producing the file's syntax tree
    /// * `source` - The file to scan
    /// * `config` - Detection options
    ///
    /// # Returns
    /// * `Ok(findings)` in document order
    /// * `Err(DetectError::Parse)` if the file cannot be parsed
    pub fn analyze<P: SourceParser + ?Sized>(
        parser: &P,
        source: &SourceFile,
        config: &DetectorConfig,
    ) -> Result<Vec<Finding>, DetectError> {
        let tree = parser.parse(source)?;
        Ok(Self::scan(source, &tree, config))
    }

    /// Scan an already parsed file
    pub fn scan(source: &SourceFile, tree: &SyntaxTree, config: &DetectorConfig) -> Vec<Finding> {
        let directives = IgnoreDirectives::from_comments(tree.comments());
        let classifier = Classifier::new(config, &directives);
        let mut findings = Vec::new();

        for (id, node, value) in tree.numeric_literals() {
            let ancestors = tree.ancestors(id);

            if let Classification::Suppressed(reason) =
                classifier.classify(value, node.span.end.line, &ancestors)
            {
                tracing::trace!(
                    file = %source.path().display(),
                    line = node.span.start.line,
                    value = value.raw(),
                    reason = reason.as_str(),
                    "literal suppressed"
                );
                continue;
            }

            match Self::build_finding(source, node, value) {
                Some(finding) => findings.push(finding),
                None => tracing::warn!(
                    file = %source.path().display(),
                    line = node.span.start.line,
                    "literal reported outside the file's lines"
                ),
            }
        }

        findings
    }

    fn build_finding(source: &SourceFile, node: &Node, value: &NumericValue) -> Option<Finding> {
        let line_number = node.span.start.line;
        let line_source = source.line(line_number)?;
        let (start_column, end_column) =
            correct_columns(line_source, node.span.start.column, node.span.end.column);
        let context = extract_context(source.lines(), line_number - 1);

        Some(Finding {
            value: value.clone(),
            file: source.display_name(),
            file_length: source.line_count(),
            line_number,
            line_source: line_source.to_string(),
            start_column,
            end_column,
            context_lines: context.lines,
            context_index: context.index,
        })
    }
}
