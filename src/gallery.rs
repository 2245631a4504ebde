//! The gallery service: from a directory path to one page of entries.
//!
//! ```text
//! page(dir, n)
//!   key = sha256(dir)
//!   index fresh? ──yes──▶ load ──ok──▶ entries            (Cached)
//!        │ no                  └─err/missing─┐
//!        ▼                                   ▼
//!   scan_directory → sort_natural → save ──ok──▶ entries  (Rebuilt)
//!                                        └─err─▶ entries  (Unsaved, logged)
//!   paginate(entries, images_per_page, n) → stats + slice
//! ```
//!
//! Stats are recomputed from the live entry list on every call, cached or
//! not. Only an unreadable directory fails a request; everything about the
//! cache degrades to rescanning.

use crate::cache;
use crate::config::{self, ConfigError, GalleryConfig};
use crate::imaging::{ImageBackend, RustBackend};
use crate::index::{FileIndexStore, IndexRecord, IndexStore};
use crate::paginate::{paginate, sort_natural};
use crate::scan::{ScanError, ScanSettings, SkippedImage, scan_directory};
use crate::thumbnail::ThumbnailEngine;
use crate::types::{GalleryStats, ImageEntry};
use log::{debug, info, warn};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Where the entries of a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStatus {
    /// Served from a fresh index without touching the directory.
    Cached,
    /// Rescanned and the new index saved.
    Rebuilt,
    /// Rescanned, but the index could not be saved.
    Unsaved,
}

/// One page of a gallery.
#[derive(Debug)]
pub struct GalleryPage {
    pub images: Vec<ImageEntry>,
    pub stats: GalleryStats,
    pub index_status: IndexStatus,
    /// Images left out of a rescan. Always empty for [`IndexStatus::Cached`].
    pub skipped: Vec<SkippedImage>,
}

struct Entries {
    images: Vec<ImageEntry>,
    status: IndexStatus,
    skipped: Vec<SkippedImage>,
}

/// Serves gallery pages for any number of directories.
pub struct Gallery<'c, B, S> {
    config: &'c GalleryConfig,
    engine: ThumbnailEngine<B>,
    store: S,
    settings: ScanSettings,
}

impl<'c> Gallery<'c, RustBackend, FileIndexStore> {
    /// Production setup: prepares the cache directory, then keeps
    /// thumbnails and JSON indexes in it.
    pub fn open(config: &'c GalleryConfig) -> Result<Self, GalleryError> {
        let cache_dir = &config.cache_directory;
        config::prepare_cache_dir(cache_dir)?;
        let engine = ThumbnailEngine::new(
            RustBackend::new(),
            cache_dir,
            config::public_prefix(cache_dir),
        );
        Ok(Self::new(config, engine, FileIndexStore::new(cache_dir)))
    }
}

impl<'c, B: ImageBackend, S: IndexStore> Gallery<'c, B, S> {
    pub fn new(config: &'c GalleryConfig, engine: ThumbnailEngine<B>, store: S) -> Self {
        Self {
            config,
            engine,
            store,
            settings: ScanSettings::from_config(config),
        }
    }

    pub fn engine(&self) -> &ThumbnailEngine<B> {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The requested page of `dir`, paged by `gallery.images_per_page`.
    pub fn page(&self, dir: &Path, requested_page: i64) -> Result<GalleryPage, GalleryError> {
        self.window(dir, self.config.gallery.images_per_page, requested_page)
    }

    /// Every entry of `dir` on a single page.
    pub fn all(&self, dir: &Path) -> Result<GalleryPage, GalleryError> {
        self.window(dir, 0, 1)
    }

    fn window(
        &self,
        dir: &Path,
        page_size: usize,
        requested_page: i64,
    ) -> Result<GalleryPage, GalleryError> {
        let entries = self.entries(dir)?;
        let page = paginate(entries.images, page_size, requested_page);
        Ok(GalleryPage {
            images: page.items,
            stats: page.stats,
            index_status: entries.status,
            skipped: entries.skipped,
        })
    }

    fn entries(&self, dir: &Path) -> Result<Entries, GalleryError> {
        let key = cache::directory_key(dir);

        if self.store.is_fresh(&key, self.config.cache.expiration) {
            match self.store.load(&key) {
                Ok(Some(record)) => {
                    debug!("index hit for {}", dir.display());
                    return Ok(Entries {
                        images: record.images,
                        status: IndexStatus::Cached,
                        skipped: Vec::new(),
                    });
                }
                Ok(None) => debug!("index for {} vanished, rescanning", dir.display()),
                Err(e) => warn!("{e}; rescanning {}", dir.display()),
            }
        }

        let outcome = scan_directory(dir, &self.engine, &self.settings)?;
        let record = IndexRecord::new(dir, sort_natural(outcome.images));
        let status = match self.store.save(&key, &record) {
            Ok(()) => IndexStatus::Rebuilt,
            Err(e) => {
                warn!("{e}; serving unsaved index");
                IndexStatus::Unsaved
            }
        };
        info!(
            "indexed {}: {} images, {} skipped, thumbnails {}",
            dir.display(),
            record.images.len(),
            outcome.skipped.len(),
            outcome.thumbnails
        );

        Ok(Entries {
            images: record.images,
            status,
            skipped: outcome.skipped,
        })
    }
}
