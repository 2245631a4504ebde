//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! photos: page 2 of 3, 25 images (index rebuilt)
//! 001 img11
//!     Source: img11.png
//!     Thumbnail: cache/100-9b1c….png
//! 002 img12
//!     Source: img12.png
//!     Thumbnail: cache/100-07aa….png
//!
//! Skipped
//!     broken.jpg: Unsupported image broken.jpg: …
//! ```
//!
//! Entries lead with their position on the page and their title; file names
//! and thumbnail paths are indented context lines.
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` for testability and has a
//! `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::gallery::{GalleryPage, IndexStatus};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn status_label(status: IndexStatus) -> &'static str {
    match status {
        IndexStatus::Cached => "cached index",
        IndexStatus::Rebuilt => "index rebuilt",
        IndexStatus::Unsaved => "index not saved",
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format one gallery page as display lines.
pub fn format_page_output(dir: &Path, page: &GalleryPage) -> Vec<String> {
    let stats = &page.stats;
    let mut lines = vec![format!(
        "{}: page {} of {}, {} ({})",
        dir.display(),
        stats.current_page,
        stats.total_pages,
        plural(stats.total_images, "image"),
        status_label(page.index_status)
    )];

    for (i, image) in page.images.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), image.title));
        lines.push(format!("{}Source: {}", indent(1), image.key));
        lines.push(format!("{}Thumbnail: {}", indent(1), image.thumbnail_path));
    }

    if !page.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &page.skipped {
            lines.push(format!("{}{}: {}", indent(1), skipped.key, skipped.error));
        }
    }

    lines
}

/// Print a gallery page to stdout.
pub fn print_page_output(dir: &Path, page: &GalleryPage) {
    for line in format_page_output(dir, page) {
        println!("{}", line);
    }
}
