// numlint data models

pub mod config;
pub mod finding;
pub mod source;
pub mod syntax;

// Re-exports for convenience
pub use config::{ConfigError, DetectorConfig};
pub use finding::Finding;
pub use source::SourceFile;
pub use syntax::{
    AncestorChain, Comment, Node, NodeId, NodeKind, NumericValue, Position, Span, SyntaxTree,
};
