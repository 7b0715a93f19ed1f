//! Utility functions for numlint
//!
//! Provides source context extraction for findings.

pub mod code_context;

pub use code_context::{correct_columns, extract_context, ContextWindow};
