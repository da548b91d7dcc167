//! Recursive file discovery over a set of traversal roots.
//!
//! Each root may be a regular file (recorded directly, subject to exclusion)
//! or a directory (every descendant is visited). The result is a fully
//! materialized, deduplicated list of non-directory paths, sorted
//! lexicographically by full path string. Any filesystem error aborts the
//! whole call; there are no partial results and no retries.

use crate::error::{Error, Result};
use crate::exclude::{EntryMeta, ExcludeRule, ExcludeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Finds all files within the given `paths`, excluding entries matched by
/// `excludes`.
///
/// Empty path entries are discarded. Exclusion rules are compiled once, then
/// every visited entry (files and directories alike) is tested against them;
/// only non-directory entries that pass are recorded. Excluded directories
/// are still descended into: exclusion gates recording, not traversal.
/// Symlinks are neither followed nor skipped by default; callers exclude them
/// with a predicate over [`EntryMeta::is_symlink`].
///
/// # Errors
///
/// Returns [`Error::Io`] if a root cannot be stat'd or any entry cannot be
/// read during traversal, and [`Error::Pattern`] for a malformed glob rule.
pub fn find_files<P: AsRef<Path>>(paths: &[P], excludes: &[ExcludeRule]) -> Result<Vec<PathBuf>> {
    let matcher = ExcludeSet::compile(excludes)?;
    let mut entries: Vec<PathBuf> = Vec::new();

    let roots: Vec<&Path> = paths
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();

    debug!(
        "Discovering files under {} root(s) with {} exclusion rule(s)",
        roots.len(),
        matcher.len()
    );

    for root in roots {
        // Link status, not target status: a symlinked root stays a symlink.
        let meta = fs::symlink_metadata(root).map_err(|e| Error::io(root, e))?;

        if !meta.is_dir() {
            let entry_meta = EntryMeta::from_metadata(&meta);
            if matcher.is_match(root, &entry_meta) {
                trace!("Excluded root {}", root.display());
            } else {
                entries.push(root.to_path_buf());
            }
            continue;
        }

        walk_tree(root, &matcher, &mut entries)?;
    }

    entries.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    entries.dedup();

    debug!("Discovered {} file(s)", entries.len());
    Ok(entries)
}

/// Walks one directory root to completion, recording non-directory entries
/// that pass the matcher.
fn walk_tree(root: &Path, matcher: &ExcludeSet, entries: &mut Vec<PathBuf>) -> Result<()> {
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| walk_error(root, e))?;

        let entry_meta = EntryMeta::from_file_type(entry.file_type());
        let path = entry.path();

        if matcher.is_match(path, &entry_meta) {
            trace!("Excluded {}", path.display());
            continue;
        }

        if !entry_meta.is_dir {
            entries.push(path.to_path_buf());
        }
    }

    Ok(())
}

/// Converts a walkdir error into a path-annotated IO error.
fn walk_error(root: &Path, e: walkdir::Error) -> Error {
    let path = e
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

    match e.into_io_error() {
        Some(io_err) => Error::io(path, io_err),
        None => Error::io(
            path,
            io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
        ),
    }
}
