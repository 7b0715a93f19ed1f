//! Tree-Sitter AST parsing utilities
//!
//! Parses JavaScript and TypeScript into the detector's [`SyntaxTree`].
//! Tree-sitter recovers from syntax errors on its own, so files the strict
//! grammar rejects still produce a usable tree.

use anyhow::{anyhow, Result};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node as TsNode, Parser, Point};

use crate::error::DetectError;
use crate::models::{Comment, Node, NodeId, NodeKind, NumericValue, Position, SourceFile, Span, SyntaxTree};
use crate::scanner::constants::{JAVASCRIPT_EXTENSIONS, TSX_EXTENSIONS, TYPESCRIPT_EXTENSIONS};

/// Produces a [`SyntaxTree`] for a source file
///
/// Implementations must be shareable across the detector's file tasks.
pub trait SourceParser: Send + Sync {
    fn parse(&self, source: &SourceFile) -> Result<SyntaxTree, DetectError>;
}

/// Grammar used for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Javascript,
    Typescript,
    Tsx,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::Tsx => "tsx",
        }
    }

    /// Detect language from file extension
    ///
    /// # Returns
    /// * `Some(language)` if the extension is a JavaScript or TypeScript one
    /// * `None` otherwise
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::from_extension(&ext)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        if JAVASCRIPT_EXTENSIONS.contains(&ext) {
            Some(Language::Javascript)
        } else if TYPESCRIPT_EXTENSIONS.contains(&ext) {
            Some(Language::Typescript)
        } else if TSX_EXTENSIONS.contains(&ext) {
            Some(Language::Tsx)
        } else {
            None
        }
    }

    fn grammar(&self) -> TsLanguage {
        match self {
            Language::Javascript => tree_sitter_javascript::LANGUAGE.into(),
            Language::Typescript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Tree-sitter backed parser
///
/// Files with an unknown extension are parsed as JavaScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeParser;

impl CodeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse JavaScript code
    pub fn parse_javascript(&self, code: &str) -> Result<SyntaxTree> {
        self.parse_language(code, Language::Javascript)
    }

    /// Parse TypeScript code
    pub fn parse_typescript(&self, code: &str) -> Result<SyntaxTree> {
        self.parse_language(code, Language::Typescript)
    }

    /// Parse code with the given grammar
    ///
    /// # Returns
    /// * `Ok(SyntaxTree)` with nodes in document order and all comments
    /// * `Err(...)` if tree-sitter fails to produce a tree
    pub fn parse_language(&self, code: &str, language: Language) -> Result<SyntaxTree> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| anyhow!("Failed to set {} language: {}", language.as_str(), e))?;

        let tree = parser
            .parse(code, None)
            .ok_or_else(|| anyhow!("Failed to parse {} code", language.as_str()))?;

        Self::lower(tree.root_node(), code)
    }

    /// Flatten a tree-sitter tree into the detector's node arena
    ///
    /// Walks named nodes in pre-order with an explicit stack. Parenthesized
    /// expressions and TypeScript type wrappers (`as`, `satisfies`, `<T>x`,
    /// `x!`) are dropped so their value attaches to the enclosing node. Type
    /// operands of those wrappers are skipped, and comments go to the tree's
    /// comment list instead of the arena.
    fn lower(root: TsNode<'_>, code: &str) -> Result<SyntaxTree> {
        let mut tree = SyntaxTree::new();
        let mut stack: Vec<(TsNode<'_>, Option<NodeId>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            match node.kind() {
                "comment" | "html_comment" => {
                    tree.push_comment(Comment {
                        text: Self::node_text(node, code)?.to_string(),
                        span: Self::span(node),
                    });
                    continue;
                }
                _ => {}
            }

            let id = if Self::is_transparent(node) {
                parent
            } else {
                let kind = Self::lower_kind(node, code, &tree, parent)?;
                Some(tree.push(Node {
                    kind,
                    parent,
                    span: Self::span(node),
                }))
            };

            for child in Self::lowered_children(node).into_iter().rev() {
                stack.push((child, id));
            }
        }

        Ok(tree)
    }

    fn is_transparent(node: TsNode<'_>) -> bool {
        matches!(
            node.kind(),
            "parenthesized_expression"
                | "as_expression"
                | "satisfies_expression"
                | "type_assertion"
                | "non_null_expression"
        )
    }

    /// Named children to walk below `node`
    ///
    /// Type wrappers only contribute their value operand.
    fn lowered_children(node: TsNode<'_>) -> Vec<TsNode<'_>> {
        let mut cursor = node.walk();
        let mut children: Vec<TsNode<'_>> = node.named_children(&mut cursor).collect();
        match node.kind() {
            "as_expression" | "satisfies_expression" | "non_null_expression" => {
                children.truncate(1);
            }
            "type_assertion" => {
                let value = children.pop();
                children = value.into_iter().collect();
            }
            _ => {}
        }
        children
    }

    fn lower_kind(
        node: TsNode<'_>,
        code: &str,
        tree: &SyntaxTree,
        parent: Option<NodeId>,
    ) -> Result<NodeKind> {
        let kind = match node.kind() {
            "number" => match NumericValue::parse(Self::node_text(node, code)?) {
                Some(value) => NodeKind::NumericLiteral(value),
                None => NodeKind::Other("number"),
            },
            "variable_declaration" => NodeKind::VariableDeclaration { is_const: false },
            "lexical_declaration" => NodeKind::VariableDeclaration {
                is_const: node.child(0).is_some_and(|keyword| keyword.kind() == "const"),
            },
            "variable_declarator" => NodeKind::VariableDeclarator {
                is_const: parent
                    .and_then(|id| tree.node(id))
                    .is_some_and(Node::is_const_declaration),
            },
            "object" => NodeKind::ObjectExpression,
            "pair" | "enum_assignment" => NodeKind::Property,
            "assignment_expression" | "augmented_assignment_expression" => {
                NodeKind::AssignmentExpression {
                    left_is_member: node.child_by_field_name("left").is_some_and(|left| {
                        matches!(left.kind(), "member_expression" | "subscript_expression")
                    }),
                }
            }
            "member_expression" | "subscript_expression" => NodeKind::MemberExpression,
            "unary_expression" => NodeKind::UnaryExpression,
            other => NodeKind::Other(other),
        };

        Ok(kind)
    }

    fn node_text<'a>(node: TsNode<'_>, code: &'a str) -> Result<&'a str> {
        Ok(node.utf8_text(code.as_bytes())?)
    }

    fn span(node: TsNode<'_>) -> Span {
        Span::new(Self::position(node.start_position()), Self::position(node.end_position()))
    }

    fn position(point: Point) -> Position {
        Position::new(point.row + 1, point.column)
    }
}

impl SourceParser for CodeParser {
    fn parse(&self, source: &SourceFile) -> Result<SyntaxTree, DetectError> {
        let language = source
            .extension()
            .and_then(|ext| Language::from_extension(&ext))
            .unwrap_or(Language::Javascript);

        self.parse_language(source.content(), language)
            .map_err(|e| DetectError::parse(source.path(), format!("{:#}", e)))
    }
}
