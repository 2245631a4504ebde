//! Shared test utilities for the snapgal test suite.
//!
//! Synthetic image writers, a gallery directory builder, and lookups over
//! scanned entries.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = gallery_dir(&["b.jpg", "a.png", "notes.txt"]);
//! let outcome = scan_directory(&tmp.path().join("photos"), &engine, &settings).unwrap();
//!
//! let sorted = sort_natural(outcome.images);
//! assert_eq!(entry_keys(&sorted), vec!["a.png", "b.jpg"]);
//! let a = find_entry(&sorted, "a.png");
//! ```

use crate::types::ImageEntry;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    })
}

/// Write a gradient JPEG of the given size.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

/// Write a gradient PNG of the given size.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Write a gradient GIF of the given size.
pub fn write_test_gif(path: &Path, width: u32, height: u32) {
    image::DynamicImage::ImageRgb8(gradient(width, height))
        .to_rgba8()
        .save_with_format(path, ImageFormat::Gif)
        .unwrap();
}

/// Write a file whose content matches its extension: a real image for
/// `jpg`/`jpeg`/`png`/`gif`, plain text for anything else.
pub fn write_fixture(path: &Path, width: u32, height: u32) {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => write_test_jpeg(path, width, height),
        "png" => write_test_png(path, width, height),
        "gif" => write_test_gif(path, width, height),
        _ => std::fs::write(path, "not an image").unwrap(),
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Temp dir holding `photos/` with the named files and an empty `cache/`.
///
/// Every image gets a distinct size so no two share content.
pub fn gallery_dir(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let photos = tmp.path().join("photos");
    std::fs::create_dir(&photos).unwrap();
    std::fs::create_dir(tmp.path().join("cache")).unwrap();
    for (i, name) in names.iter().enumerate() {
        let side = 16 + i as u32;
        write_fixture(&photos.join(name), side * 2, side);
    }
    tmp
}

// =========================================================================
// Entry lookups: panic with a clear message on miss
// =========================================================================

/// Find an entry by key. Panics if not found.
pub fn find_entry<'a>(entries: &'a [ImageEntry], key: &str) -> &'a ImageEntry {
    entries.iter().find(|e| e.key == key).unwrap_or_else(|| {
        let keys = entry_keys(entries);
        panic!("entry '{key}' not found. Available: {keys:?}")
    })
}

/// All entry keys in order.
pub fn entry_keys(entries: &[ImageEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.key.as_str()).collect()
}
