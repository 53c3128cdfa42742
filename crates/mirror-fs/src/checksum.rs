//! SHA-256 content digests
//!
//! Provides a single canonical digest format (`sha256:<hex>`) used as the
//! content-equality proxy between source and replica files. Files are read
//! in fixed-size chunks so memory use stays constant regardless of file size.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Prefix for all digests produced by this module
const PREFIX: &str = "sha256:";

/// Chunk size for streaming file reads
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 digest of in-memory content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn digest_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 digest of a file's contents.
///
/// Reads the file in 64 KiB chunks feeding a streaming hasher. Returns a
/// string in the canonical format `"sha256:<hex>"`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a read fails mid-stream.
pub fn digest_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk).map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }
    Ok(format!("{}{:x}", PREFIX, hasher.finalize()))
}
