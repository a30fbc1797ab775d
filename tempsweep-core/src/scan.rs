//! Deterministic source-file discovery with directory pruning.
//!
//! - Early directory pruning via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Entries sorted by file name inside each directory, so repeated scans
//!   of an unchanged tree visit files in the same order
//! - Walk errors (unreadable directories, broken links) are logged and
//!   skipped, never fatal

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::{SweepError, SweepResult};

/// Directories excluded by default (build output and tool caches).
const EXCLUDED_DIRS: &[&str] = &[".git", ".dart_tool", "build", ".pub-cache", "node_modules"];

/// A file found by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the source root, host separators
    pub relative: String,
    /// Final path component
    pub filename: String,
}

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Validate that `root` exists and contains `source_dir`, returning the
/// joined source root. This is the only fatal check in a run.
pub fn resolve_source_root(root: &Path, source_dir: &str) -> SweepResult<PathBuf> {
    if !root.is_dir() {
        return Err(SweepError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let source_root = if source_dir.is_empty() || source_dir == "." {
        root.to_path_buf()
    } else {
        root.join(source_dir)
    };

    if !source_root.is_dir() {
        return Err(SweepError::MissingSourceDir {
            root: root.to_path_buf(),
            dir: source_dir.to_string(),
        });
    }

    Ok(source_root)
}

/// Gathers every file with the given extension under `source_root`, in
/// directory-then-name lexical order.
pub fn gather_source_files(source_root: &Path, extension: &str) -> Vec<DiscoveredFile> {
    gather_source_files_with_excludes(source_root, extension, &[])
}

/// Like [`gather_source_files`] with extra directory names to prune.
pub fn gather_source_files_with_excludes(
    source_root: &Path,
    extension: &str,
    excludes: &[&str],
) -> Vec<DiscoveredFile> {
    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();
    let extension = extension.trim_start_matches('.');

    WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        // Follows symlinks, unlike `file_type()`
        .filter(|e| e.path().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .map(|e| {
            let path = e.path().to_path_buf();
            let relative = path
                .strip_prefix(source_root)
                .unwrap_or(&path)
                .to_string_lossy()
                .to_string();
            let filename = e.file_name().to_string_lossy().to_string();
            DiscoveredFile {
                path,
                relative,
                filename,
            }
        })
        .collect()
}
