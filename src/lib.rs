// Numlint - magic number detection for JavaScript and TypeScript
// Module re-exports

pub mod error;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use error::DetectError;
pub use models::{ConfigError, DetectorConfig, Finding, NumericValue, SourceFile, SyntaxTree};

pub use reporters::{report, Reporter, ReporterKind};
pub use rules::{Classification, Classifier, IgnoreDirectives};
pub use scanner::{
    collect_source_files, CodeParser, Detector, DetectorEvent, JavaScriptScanner, RunReport,
    RunSummary, SourceParser,
};
