//! Magic number classification
//!
//! Decides whether a numeric literal is reported. Rules are checked in order
//! and the first match wins:
//!
//! 1. ignore directives on the literal's end line
//! 2. the configured ignore list
//! 3. structural position in the tree, which depends on the mode:
//!    - `enforce_const`: only literals bound with `const` are exempt
//!    - default: declarations, and unless `detect_objects` is set, object
//!      literals and assignments, count as naming the value

use crate::models::{AncestorChain, DetectorConfig, Node, NodeKind, NumericValue};
use crate::rules::directives::IgnoreDirectives;

/// Why a literal was not reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionReason {
    Directive,
    IgnoredValue,
    Structural,
}

impl SuppressionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuppressionReason::Directive => "directive",
            SuppressionReason::IgnoredValue => "ignored_value",
            SuppressionReason::Structural => "structural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Reportable,
    Suppressed(SuppressionReason),
}

impl Classification {
    pub fn is_reportable(&self) -> bool {
        matches!(self, Classification::Reportable)
    }
}

/// Classifies numeric literals against one run's configuration
pub struct Classifier<'a> {
    config: &'a DetectorConfig,
    directives: &'a IgnoreDirectives,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a DetectorConfig, directives: &'a IgnoreDirectives) -> Self {
        Self { config, directives }
    }

    /// Classify a literal
    ///
    /// # Arguments
    /// * `value` - The literal's value
    /// * `end_line` - 1-indexed line the literal ends on
    /// * `ancestors` - The literal's nearest ancestors
    pub fn classify(
        &self,
        value: &NumericValue,
        end_line: usize,
        ancestors: &AncestorChain<'_>,
    ) -> Classification {
        if self.directives.is_suppressed(end_line) {
            return Classification::Suppressed(SuppressionReason::Directive);
        }

        if self.config.is_ignored_value(value.value()) {
            return Classification::Suppressed(SuppressionReason::IgnoredValue);
        }

        let exempt = if self.config.enforce_const {
            Self::is_const_bound(ancestors)
        } else {
            Self::is_structurally_named(ancestors, self.config.detect_objects)
        };

        if exempt {
            Classification::Suppressed(SuppressionReason::Structural)
        } else {
            Classification::Reportable
        }
    }

    fn is_const_bound(ancestors: &AncestorChain<'_>) -> bool {
        let Some(parent) = ancestors.parent() else {
            return false;
        };

        if parent.is_const_binding() {
            return true;
        }

        if ancestors.grandparent().is_some_and(Node::is_const_declaration) {
            return true;
        }

        // `const X = -1`: the sign wraps the literal one level deeper
        parent.is_unary()
            && ancestors
                .great_grandparent()
                .is_some_and(Node::is_const_declaration)
    }

    fn is_structurally_named(ancestors: &AncestorChain<'_>, detect_objects: bool) -> bool {
        let Some(parent) = ancestors.parent() else {
            return false;
        };

        if is_ignored_type(&parent.kind, detect_objects) {
            return true;
        }

        if parent.is_unary()
            && ancestors
                .grandparent()
                .is_some_and(|grandparent| is_ignored_type(&grandparent.kind, detect_objects))
        {
            return true;
        }

        if let NodeKind::AssignmentExpression { left_is_member } = parent.kind {
            // `obj.FIELD = 1` reads as a named constant unless objects are inspected
            if !detect_objects && left_is_member {
                return true;
            }
            // plain reassignment is never interesting, even when inspecting objects
            if detect_objects && !left_is_member {
                return true;
            }
        }

        false
    }
}

/// Parent kinds that give a literal a name. Object construction and
/// assignments only count while `detect_objects` is off.
fn is_ignored_type(kind: &NodeKind, detect_objects: bool) -> bool {
    match kind {
        NodeKind::VariableDeclaration { .. } | NodeKind::VariableDeclarator { .. } => true,
        NodeKind::ObjectExpression | NodeKind::Property | NodeKind::AssignmentExpression { .. } => {
            !detect_objects
        }
        _ => false,
    }
}
