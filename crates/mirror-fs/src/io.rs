//! File copy with modification-time preservation

use std::fs;

use filetime::FileTime;

use crate::{Error, NormalizedPath, Result};

/// Copy `source` to `dest`, then restore the source modification time on
/// the destination.
///
/// `fs::copy` carries content and permissions but stamps a fresh mtime;
/// restoring it keeps the replica entry indistinguishable from its source.
/// A failure to set the mtime is ignored: content equality is what the
/// reconciler actually relies on.
pub fn copy_file(source: &NormalizedPath, dest: &NormalizedPath) -> Result<u64> {
    let source_native = source.to_native();
    let dest_native = dest.to_native();

    let bytes = fs::copy(&source_native, &dest_native).map_err(|e| Error::io(&source_native, e))?;

    if let Ok(metadata) = fs::metadata(&source_native) {
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(&dest_native, mtime).ok();
    }

    Ok(bytes)
}

/// Remove a single file.
pub fn remove_file(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::remove_file(&native).map_err(|e| Error::io(&native, e))
}

/// Create a single directory (non-recursive).
///
/// The parent must already exist; callers rely on parent-before-child
/// ordering from [`crate::walk::list_dirs`].
pub fn create_dir(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::create_dir(&native).map_err(|e| Error::io(&native, e))
}

/// Remove a directory and everything beneath it.
pub fn remove_dir_all(path: &NormalizedPath) -> Result<()> {
    let native = path.to_native();
    fs::remove_dir_all(&native).map_err(|e| Error::io(&native, e))
}
