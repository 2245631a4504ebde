//! # Snapgal
//!
//! A directory-backed image gallery. Point it at a folder of photos and it
//! serves paged listings with square thumbnails, remembering what it found so
//! repeated requests neither rescan the folder nor re-encode images.
//!
//! # Architecture: Request Pipeline
//!
//! ```text
//! Gallery::page(dir, n)
//!   ├─ fresh index?  index::IndexStore::load          (cache hit)
//!   └─ otherwise     scan::scan_directory             (list + classify)
//!                      └─ thumbnail::ThumbnailEngine  (hash, crop, resize, encode)
//!                    paginate::sort_natural           (img2 before img10)
//!                    index::IndexStore::save          (best effort)
//!   paginate::PageWindow                              (stats + slice)
//! ```
//!
//! Everything written to the cache directory is content-addressed, so
//! concurrent or repeated work always converges on the same files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`gallery`] | Request orchestration: index freshness, rescans, paging |
//! | [`scan`] | Lists one directory and builds an entry per supported image |
//! | [`classify`] | Content-signature detection of JPEG, PNG and GIF |
//! | [`thumbnail`] | Content-addressed square thumbnails |
//! | [`imaging`] | Crop geometry and the pure-Rust pixel backend |
//! | [`index`] | Persisted directory indexes and their freshness rule |
//! | [`cache`] | Hashing and naming of cache artifacts |
//! | [`paginate`] | Natural ordering, page windows, request parsing |
//! | [`config`] | `config.toml` loading, validation, cache directory setup |
//! | [`render`] | Gallery HTML via Maud |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Entries and stats shared between modules |
//!
//! # Design Decisions
//!
//! ## Content Over Extensions
//!
//! Whether a file is an image is decided by its leading bytes, never by its
//! name. A PNG called `notes.txt` is shown; a text file called `photo.jpg` is
//! not. Thumbnails keep the source's codec, so no format conversion happens.
//!
//! ## Failure Isolation
//!
//! One unreadable or corrupt image never costs the whole page: it is logged
//! and reported in [`gallery::GalleryPage::skipped`]. A broken or unwritable
//! index only means the next request rescans. The single fatal case is a
//! directory that cannot be listed.

pub mod cache;
pub mod classify;
pub mod config;
pub mod gallery;
pub mod imaging;
pub mod index;
pub mod output;
pub mod paginate;
pub mod render;
pub mod scan;
pub mod thumbnail;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

/// Crate version, shown in generated markup and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
