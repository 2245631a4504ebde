//! Persisted directory indexes.
//!
//! Scanning a directory means hashing every file and possibly encoding
//! thumbnails, so the result is kept as an [`IndexRecord`] and reused until
//! it expires. Records are only ever replaced whole.
//!
//! # Storage
//!
//! Storage is behind the [`IndexStore`] trait so the backend can change
//! without touching scanning or pagination. [`FileIndexStore`] keeps one JSON
//! file per directory in the cache directory:
//!
//! ```text
//! cache/
//! ├── 3f2a…e1.index        # sha256("gallery-images"), JSON IndexRecord
//! ├── 100-9b1c…07.jpg      # thumbnails (see crate::cache)
//! └── …
//! ```
//!
//! Writes go to a temp file in the same directory and are renamed into
//! place, so a concurrent reader never sees a half-written index.
//!
//! # Freshness
//!
//! A record is fresh while `now - mtime < expiration`. An expiration of zero
//! or less disables caching outright instead of depending on the clock
//! having moved since the last write. A modification time in the future
//! counts as zero elapsed.

use crate::cache;
use crate::types::ImageEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Version of the index format. Bump this to invalidate all existing
/// indexes when the format changes.
pub const INDEX_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Cannot read index {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Index {path} cannot be decoded: {reason}")]
    Deserialization { path: PathBuf, reason: String },
    #[error("Cannot write index {path}: {source}")]
    CacheWriteFailed { path: PathBuf, source: io::Error },
}

/// A scanned directory as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub version: u32,
    /// The directory path as it was requested.
    pub directory: String,
    pub created_at: DateTime<Utc>,
    /// Entries in display order.
    pub images: Vec<ImageEntry>,
}

impl IndexRecord {
    pub fn new(directory: &Path, images: Vec<ImageEntry>) -> Self {
        Self {
            version: INDEX_VERSION,
            directory: directory.to_string_lossy().into_owned(),
            created_at: Utc::now(),
            images,
        }
    }
}

/// Storage for directory indexes, addressed by [`cache::directory_key`].
pub trait IndexStore {
    /// Load a record. `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<IndexRecord>, IndexError>;

    /// Replace the record stored under `key`.
    fn save(&self, key: &str, record: &IndexRecord) -> Result<(), IndexError>;

    /// Whether the record under `key` was written less than
    /// `expiration_minutes` ago.
    fn is_fresh(&self, key: &str, expiration_minutes: i64) -> bool;
}

/// Freshness rule shared by every store.
pub fn is_fresh_at(modified: SystemTime, now: SystemTime, expiration_minutes: i64) -> bool {
    if expiration_minutes <= 0 {
        return false;
    }
    let elapsed = now.duration_since(modified).unwrap_or(Duration::ZERO);
    let window = Duration::from_secs((expiration_minutes as u64).saturating_mul(60));
    elapsed < window
}

/// JSON index files in a directory.
#[derive(Debug, Clone)]
pub struct FileIndexStore {
    dir: PathBuf,
}

impl FileIndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(cache::index_filename(key))
    }
}

impl IndexStore for FileIndexStore {
    fn load(&self, key: &str) -> Result<Option<IndexRecord>, IndexError> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(IndexError::Io { path, source }),
        };
        let record: IndexRecord =
            serde_json::from_str(&content).map_err(|e| IndexError::Deserialization {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        if record.version != INDEX_VERSION {
            return Err(IndexError::Deserialization {
                path,
                reason: format!(
                    "format version {} (expected {INDEX_VERSION})",
                    record.version
                ),
            });
        }
        Ok(Some(record))
    }

    fn save(&self, key: &str, record: &IndexRecord) -> Result<(), IndexError> {
        let path = self.path_for(key);
        let write = || -> io::Result<()> {
            let json = serde_json::to_string_pretty(record)?;
            let mut tmp = NamedTempFile::new_in(&self.dir)?;
            tmp.write_all(json.as_bytes())?;
            tmp.persist(&path)?;
            Ok(())
        };
        write().map_err(|source| IndexError::CacheWriteFailed {
            path: path.clone(),
            source,
        })
    }

    fn is_fresh(&self, key: &str, expiration_minutes: i64) -> bool {
        std::fs::metadata(self.path_for(key))
            .and_then(|meta| meta.modified())
            .is_ok_and(|modified| is_fresh_at(modified, SystemTime::now(), expiration_minutes))
    }
}
