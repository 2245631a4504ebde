//! Shared types passed between the scanner, the index, and the renderers.

use serde::{Deserialize, Serialize};

/// One image of a gallery directory.
///
/// Built once by the scanner and never modified afterwards; cached indexes
/// store these verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// File name, unique within its directory.
    pub key: String,
    /// File stem with underscores turned into spaces.
    pub title: String,
    /// `{directory}/{file name}`, already HTML-escaped.
    pub display_path: String,
    /// Path of the cached square thumbnail.
    pub thumbnail_path: String,
}

/// Position of the current page within a gallery.
///
/// Derived on every request from the live entry count and page inputs,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryStats {
    /// 1-based, clamped into `1..=total_pages`.
    pub current_page: usize,
    pub total_images: usize,
    /// At least 1, even for an empty gallery.
    pub total_pages: usize,
}
