//! Content addressing for the cache directory.
//!
//! Everything the gallery writes is named after a hash, never after the
//! file it came from:
//!
//! - **Thumbnails** are `{size}-{sha256(source bytes)}.{ext}`. Identical
//!   bytes at the same size always land on the same file, so a thumbnail is
//!   shared across directories and survives renames. An existing file is
//!   trusted as-is; its content is never re-verified.
//! - **Directory indexes** are `{sha256(directory path)}.index`, one per
//!   scanned directory.
//!
//! Content hashing (rather than mtime) keeps lookups stable across copies
//! and checkouts that reset modification times.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io;
use std::path::Path;

/// Extension of directory index files.
pub const INDEX_EXTENSION: &str = "index";

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

/// SHA-256 hash of a byte slice, returned as a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Cache key of a scanned directory: the hash of its path as given.
pub fn directory_key(directory: &Path) -> String {
    hash_bytes(directory.to_string_lossy().as_bytes())
}

/// File name of a thumbnail: `{size}-{source_hash}.{ext}`.
pub fn thumbnail_filename(size: u32, source_hash: &str, extension: &str) -> String {
    format!("{size}-{source_hash}.{extension}")
}

/// File name of a directory index.
pub fn index_filename(key: &str) -> String {
    format!("{key}.{INDEX_EXTENSION}")
}

/// Thumbnail cache performance for one scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} encoded ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} encoded", self.misses)
        }
    }
}
