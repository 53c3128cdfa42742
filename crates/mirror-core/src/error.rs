//! Error types for mirror-core

use std::path::PathBuf;

/// Result type for mirror-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirror-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured path does not exist at startup
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// A configured path exists but is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The journal file could not be written
    #[error("Failed to append to journal {path}: {source}")]
    Journal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from mirror-fs
    #[error(transparent)]
    Fs(#[from] mirror_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
