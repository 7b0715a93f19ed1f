//! Input path expansion
//!
//! Turns the paths given on the command line into the list of files a
//! detector run processes. Directories are walked recursively; explicit file
//! paths are passed through untouched so that a missing or unreadable file
//! surfaces as a run error rather than being silently dropped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::scanner::constants::{is_source_extension, SKIP_DIRECTORIES};

/// Expand `paths` into a sorted, de-duplicated list of files
///
/// # Arguments
/// * `paths` - Files and directories named by the user
///
/// # Returns
/// Every explicit file path, plus every JavaScript or TypeScript file found
/// under each directory outside [`SKIP_DIRECTORIES`].
pub fn collect_source_files<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();

        if !path.is_dir() {
            files.insert(path.to_path_buf());
            continue;
        }

        let before = files.len();
        for entry in WalkDir::new(path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && has_source_extension(entry.path()) {
                files.insert(entry.into_path());
            }
        }

        tracing::debug!(
            dir = %path.display(),
            files = files.len() - before,
            "expanded directory"
        );
    }

    files.into_iter().collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_source_extension)
}
