//! Magic number scanning engine
//!
//! Provides input expansion, AST parsing, per-file scanning and the
//! concurrent detector run.

pub mod constants;
pub mod detector;
pub mod file_collector;
pub mod javascript_scanner;
pub mod tree_sitter_utils;

pub use constants::SKIP_DIRECTORIES;
pub use detector::{Detector, DetectorEvent, RunReport, RunSummary};
pub use file_collector::collect_source_files;
pub use javascript_scanner::JavaScriptScanner;
pub use tree_sitter_utils::{CodeParser, Language, SourceParser};
