//! Magic number rules
//! Ignore directives and the literal classifier

pub mod classifier;
pub mod directives;

pub use classifier::{Classification, Classifier, SuppressionReason};
pub use directives::{DirectiveScanner, IgnoreDirectives};
