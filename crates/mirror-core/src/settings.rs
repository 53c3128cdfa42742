//! Validated runtime settings
//!
//! Startup validation mirrors the launch contract: the source, replica, and
//! log paths must all exist before the first cycle runs, and the interval is
//! whole seconds. Roots are canonicalized up front so every journal entry
//! carries an absolute path regardless of how the process was invoked.

use std::path::Path;
use std::time::Duration;

use mirror_fs::NormalizedPath;

use crate::{Error, Result};

/// Validated configuration for the sync loop.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Absolute path of the tree being mirrored from
    pub source: NormalizedPath,
    /// Absolute path of the mirrored copy
    pub replica: NormalizedPath,
    /// Absolute path of the append-only log file
    pub log_file: NormalizedPath,
    /// Pause between cycles
    pub interval: Duration,
}

impl Settings {
    /// Validate and canonicalize the launch arguments.
    ///
    /// # Errors
    ///
    /// Fails if any path does not exist, or if source/replica are not
    /// directories. These are fatal: no cycle may run on bad settings.
    pub fn new(
        source: &Path,
        replica: &Path,
        log_file: &Path,
        interval_secs: u64,
    ) -> Result<Self> {
        let source = canonicalize_dir(source)?;
        let replica = canonicalize_dir(replica)?;
        let log_file = canonicalize(log_file)?;

        Ok(Self {
            source,
            replica,
            log_file,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

fn canonicalize(path: &Path) -> Result<NormalizedPath> {
    // dunce keeps Windows results in drive-letter form instead of \\?\ UNC.
    let absolute = dunce::canonicalize(path).map_err(|_| Error::PathNotFound {
        path: path.to_path_buf(),
    })?;
    Ok(NormalizedPath::new(absolute))
}

fn canonicalize_dir(path: &Path) -> Result<NormalizedPath> {
    let normalized = canonicalize(path)?;
    if !normalized.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(normalized)
}
