//! Recursive tree listing
//!
//! Enumerates every directory or every regular file under a root, producing
//! paths relative to that root. Traversal uses an explicit worklist rather
//! than call-stack recursion, so arbitrarily deep trees cannot overflow the
//! stack. Relative paths are always computed against the original root
//! argument, never against an intermediate directory.
//!
//! Symbolic links are skipped entirely: they are listed neither as
//! directories nor as files, and are never descended into.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result};

/// What a traversal collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collect {
    Dirs,
    Files,
}

/// List every directory under `root`, recursively.
///
/// Paths are relative to `root`. A directory always appears in the result
/// before any of its descendants, which lets a consumer create directories
/// one level at a time without ever hitting a missing parent.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root` does not exist at call time.
pub fn list_dirs(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    walk(root, Collect::Dirs)
}

/// List every regular file under `root`, recursively.
///
/// Paths are relative to `root`. No ordering is guaranteed beyond what the
/// traversal produces.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root` does not exist at call time.
pub fn list_files(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    walk(root, Collect::Files)
}

fn walk(root: &NormalizedPath, collect: Collect) -> Result<Vec<NormalizedPath>> {
    let root_native = root.to_native();
    if !root_native.exists() {
        return Err(Error::NotFound { path: root_native });
    }

    let mut collected = Vec::new();
    let mut pending: Vec<PathBuf> = vec![root_native.clone()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            // A subtree deleted externally mid-walk is a tolerated race:
            // the next cycle sees the final state.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "directory vanished during walk");
                continue;
            }
            Err(e) => return Err(Error::io(&dir, e)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&dir, e))?;
            // file_type() does not follow symlinks, so a link to a
            // directory is seen as a symlink and skipped here.
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            if file_type.is_symlink() {
                tracing::debug!(path = %entry.path().display(), "skipping symlink");
                continue;
            }

            let path = entry.path();
            if file_type.is_dir() {
                if collect == Collect::Dirs {
                    collected.push(relative(&root_native, &path));
                }
                pending.push(path);
            } else if file_type.is_file() && collect == Collect::Files {
                collected.push(relative(&root_native, &path));
            }
        }
    }

    Ok(collected)
}

fn relative(root: &Path, path: &Path) -> NormalizedPath {
    // Every walked path starts with the root we seeded the worklist with.
    let rel = path.strip_prefix(root).unwrap_or(path);
    NormalizedPath::new(rel)
}
