//! Syntax tree model consumed by the detector
//!
//! Parsers lower their concrete trees into a flat arena of [`Node`]s stored in
//! document order, each holding the index of its parent. Only the node kinds
//! the classifier inspects get their own variant; everything else is carried
//! as [`NodeKind::Other`].

use std::fmt;

const ANCESTOR_DEPTH: usize = 3;

/// Source position. Lines are 1-indexed, columns are 0-indexed byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start and end position of a node or comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Numeric literal value, keeping the spelling it had in source
///
/// `0x1F`, `0o17`, `017`, `1_000` and `10n` are all decoded, but the raw
/// text is what gets displayed so reports match what the user wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValue {
    raw: String,
    value: f64,
}

impl NumericValue {
    /// Decode a numeric literal as spelled in JavaScript/TypeScript source
    ///
    /// # Returns
    /// * `Some(value)` for any valid numeric literal
    /// * `None` if the text is not a number
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
        let body = cleaned.strip_suffix('n').unwrap_or(&cleaned);
        let lower = body.to_ascii_lowercase();

        let value = if let Some(digits) = lower.strip_prefix("0x") {
            decode_radix(digits, 16)?
        } else if let Some(digits) = lower.strip_prefix("0o") {
            decode_radix(digits, 8)?
        } else if let Some(digits) = lower.strip_prefix("0b") {
            decode_radix(digits, 2)?
        } else if is_legacy_octal(&lower) {
            decode_radix(&lower[1..], 8)?
        } else {
            lower.parse::<f64>().ok()?
        };

        Some(Self {
            raw: raw.trim().to_string(),
            value,
        })
    }

    /// Literal text exactly as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Decoded numeric value
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl serde::Serialize for NumericValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let integral = self.value.fract() == 0.0 && self.value.abs() < i64::MAX as f64;
        if integral {
            serializer.serialize_i64(self.value as i64)
        } else {
            serializer.serialize_f64(self.value)
        }
    }
}

fn decode_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        let digit = c.to_digit(radix)?;
        Some(acc * radix as f64 + digit as f64)
    })
}

// `0755` style literals from sloppy-mode code. `08` and `09` stay decimal.
fn is_legacy_octal(text: &str) -> bool {
    text.len() > 1
        && text.starts_with('0')
        && text.bytes().all(|b| (b'0'..=b'7').contains(&b))
}

/// Syntax kinds the classifier distinguishes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    NumericLiteral(NumericValue),
    /// `var`, `let` or `const` statement
    VariableDeclaration { is_const: bool },
    /// Single binding inside a declaration; inherits the declaration's `const`
    VariableDeclarator { is_const: bool },
    ObjectExpression,
    Property,
    AssignmentExpression { left_is_member: bool },
    MemberExpression,
    UnaryExpression,
    Other(&'static str),
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::NumericLiteral(_) => "NumericLiteral",
            NodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            NodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::Other(kind) => kind,
        }
    }
}

/// Index of a node in its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub span: Span,
}

impl Node {
    /// True for a declaration or declarator bound with `const`
    pub fn is_const_binding(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::VariableDeclaration { is_const: true }
                | NodeKind::VariableDeclarator { is_const: true }
        )
    }

    /// True only for a `const` declaration statement
    pub fn is_const_declaration(&self) -> bool {
        matches!(self.kind, NodeKind::VariableDeclaration { is_const: true })
    }

    pub fn is_unary(&self) -> bool {
        matches!(self.kind, NodeKind::UnaryExpression)
    }

    pub fn numeric_value(&self) -> Option<&NumericValue> {
        match &self.kind {
            NodeKind::NumericLiteral(value) => Some(value),
            _ => None,
        }
    }
}

/// A comment seen while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

/// Parsed file: node arena in document order plus every comment in source order
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    comments: Vec<Comment>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id. Parents must be pushed before children.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Numeric literal nodes in document order
    pub fn numeric_literals(&self) -> impl Iterator<Item = (NodeId, &Node, &NumericValue)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.numeric_value().map(|value| (NodeId(idx), node, value)))
    }

    /// Nearest ancestors of a node
    pub fn ancestors(&self, id: NodeId) -> AncestorChain<'_> {
        let mut nearest = [None; ANCESTOR_DEPTH];
        let mut current = self.node(id).and_then(|node| node.parent);

        for slot in nearest.iter_mut() {
            match current.and_then(|parent| self.node(parent)) {
                Some(node) => {
                    *slot = Some(node);
                    current = node.parent;
                }
                None => break,
            }
        }

        AncestorChain { nearest }
    }
}

/// The ancestors of a literal, truncated to the three closest to it
///
/// Conceptually the chain runs from the root down to the literal's parent;
/// only the tail is ever inspected so only the tail is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct AncestorChain<'a> {
    nearest: [Option<&'a Node>; ANCESTOR_DEPTH],
}

impl<'a> AncestorChain<'a> {
    pub const DEPTH: usize = ANCESTOR_DEPTH;

    /// Build a chain from ancestors listed nearest first
    pub fn from_nearest(ancestors: &[&'a Node]) -> Self {
        let mut nearest = [None; ANCESTOR_DEPTH];
        for (slot, node) in nearest.iter_mut().zip(ancestors.iter()) {
            *slot = Some(*node);
        }
        Self { nearest }
    }

    pub fn parent(&self) -> Option<&'a Node> {
        self.nearest[0]
    }

    pub fn grandparent(&self) -> Option<&'a Node> {
        self.nearest[1]
    }

    pub fn great_grandparent(&self) -> Option<&'a Node> {
        self.nearest[2]
    }
}
