//! Directory scanning.
//!
//! Lists one gallery directory (no recursion), keeps the entries whose
//! content is a JPEG, PNG or GIF, and makes sure each has a thumbnail:
//!
//! ```text
//! photos/
//! ├── My_Holiday.jpg     → key "My_Holiday.jpg", title "My Holiday"
//! ├── img2.png           → key "img2.png", title "img2"
//! ├── notes.txt          # not an image: skipped silently
//! ├── broken.jpg         # JPEG header, truncated data: skipped with a warning
//! └── nested/            # directories are never descended into
//! ```
//!
//! The result is an unordered mapping from file name to [`ImageEntry`];
//! ordering is applied later by [`crate::paginate::sort_natural`].
//!
//! Only an unreadable directory fails the scan. A single bad image is logged,
//! recorded in [`ScanOutcome::skipped`], and left out.

use crate::cache::CacheStats;
use crate::classify::is_supported_image;
use crate::config::{GalleryConfig, url_path};
use crate::imaging::{BackendError, ImageBackend, Quality};
use crate::thumbnail::ThumbnailEngine;
use crate::types::ImageEntry;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Thumbnail parameters applied to every image of a scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanSettings {
    pub thumbnail_size: u32,
    pub quality: Quality,
}

impl ScanSettings {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            thumbnail_size: config.thumbnails.size,
            quality: Quality::new(config.thumbnails.quality),
        }
    }
}

/// An image that was classified as supported but could not be thumbnailed.
#[derive(Debug)]
pub struct SkippedImage {
    pub key: String,
    pub error: BackendError,
}

/// Everything one scan produced.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// File name → entry, in no particular order.
    pub images: HashMap<String, ImageEntry>,
    pub skipped: Vec<SkippedImage>,
    pub thumbnails: CacheStats,
}

/// Scan `dir` and build an entry for every supported image in it.
///
/// Keys and titles come from the resolved file, display paths from the name
/// as listed in `dir`. Two links resolving to files with the same name share
/// a key, and the later one wins. Entries whose names are not valid UTF-8
/// are skipped.
///
/// `dir` is used as given for display paths, so the same directory passed as
/// `photos` and `./photos` produces different (but equivalent) paths.
pub fn scan_directory<B: ImageBackend>(
    dir: &Path,
    engine: &ThumbnailEngine<B>,
    settings: &ScanSettings,
) -> Result<ScanOutcome, ScanError> {
    let listing = fs::read_dir(dir).map_err(|source| ScanError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let display_dir = url_path(dir);
    let mut outcome = ScanOutcome::default();

    for entry in listing.filter_map(|e| e.ok()) {
        let Ok(real_path) = fs::canonicalize(entry.path()) else {
            debug!("skipping {}: cannot resolve path", entry.path().display());
            continue;
        };
        if !is_supported_image(&real_path) {
            continue;
        }

        // Paths in markup must name the real file, so lossy names are out.
        let (Ok(listed_name), Some(key)) = (
            entry.file_name().into_string(),
            real_path.file_name().and_then(|n| n.to_str()).map(str::to_string),
        ) else {
            debug!("skipping {}: name is not valid UTF-8", entry.path().display());
            continue;
        };
        let thumbnail_path = match engine.ensure_counted(
            &real_path,
            settings.thumbnail_size,
            settings.quality,
            &mut outcome.thumbnails,
        ) {
            Ok(path) => path,
            Err(error) => {
                warn!("skipping {key}: {error}");
                outcome.skipped.push(SkippedImage { key, error });
                continue;
            }
        };

        let image = ImageEntry {
            title: title_from_name(&key),
            display_path: escape_html(&join_display(&display_dir, &listed_name)),
            thumbnail_path,
            key: key.clone(),
        };
        insert_entry(&mut outcome.images, image);
    }

    debug!(
        "scanned {}: {} images, thumbnails {}",
        dir.display(),
        outcome.images.len(),
        outcome.thumbnails
    );
    Ok(outcome)
}

/// Add `entry` under its key. A later entry with the same key replaces the
/// earlier one.
pub fn insert_entry(images: &mut HashMap<String, ImageEntry>, entry: ImageEntry) {
    images.insert(entry.key.clone(), entry);
}

/// Derive a display title from a file name.
///
/// - `My_Holiday.jpg` → `My Holiday`
/// - `archive.tar.gz` → `archive.tar`  (only the last extension goes)
/// - `.hidden` → `.hidden`
pub fn title_from_name(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
        .replace('_', " ")
}

fn join_display(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

fn escape_html(text: &str) -> String {
    maud::html! { (text) }.into_string()
}
