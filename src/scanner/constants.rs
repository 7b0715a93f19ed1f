//! Scanner constants and configuration
//!
//! Centralized constants used across scanner modules

/// Directories to skip while expanding directory arguments
///
/// Dependencies, bundles and build output hold generated code the user
/// does not own.
pub const SKIP_DIRECTORIES: &[&str] = &[
    // Dependencies
    "node_modules",
    "bower_components",
    "jspm_packages",
    "vendor",

    // Version control
    ".git",
    ".hg",
    ".svn",

    // Build outputs
    "dist",
    "build",
    "out",
    "target",

    // Framework and tooling caches
    ".next",
    ".nuxt",
    ".svelte-kit",
    ".turbo",
    ".cache",
    ".parcel-cache",
    "coverage",
];

pub const JAVASCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs"];

pub const TYPESCRIPT_EXTENSIONS: &[&str] = &["ts", "mts", "cts"];

pub const TSX_EXTENSIONS: &[&str] = &["tsx"];

/// Returns true if a file extension (without the dot) names a source file the
/// detector understands
pub fn is_source_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    let ext = ext.as_str();
    JAVASCRIPT_EXTENSIONS.contains(&ext)
        || TYPESCRIPT_EXTENSIONS.contains(&ext)
        || TSX_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_directories_contains_common_dirs() {
        assert!(SKIP_DIRECTORIES.contains(&"node_modules"));
        assert!(SKIP_DIRECTORIES.contains(&".git"));
        assert!(SKIP_DIRECTORIES.contains(&"dist"));
    }

    #[test]
    fn test_no_duplicate_skip_directories() {
        let mut seen = std::collections::HashSet::new();
        for dir in SKIP_DIRECTORIES {
            assert!(seen.insert(dir), "Duplicate directory: {}", dir);
        }
    }

    #[test]
    fn test_source_extensions() {
        for ext in ["js", "jsx", "mjs", "cjs", "ts", "mts", "cts", "tsx", "JS", "Tsx"] {
            assert!(is_source_extension(ext), "{} should be a source extension", ext);
        }
        for ext in ["json", "py", "css", "d", ""] {
            assert!(!is_source_extension(ext), "{} should not be a source extension", ext);
        }
    }
}
