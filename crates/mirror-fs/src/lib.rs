//! Filesystem layer for Folder Mirror
//!
//! Provides platform-neutral path handling, content checksums, and the
//! recursive tree listing used by the reconciliation engine.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use path::NormalizedPath;
