//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the thumbnail engine
//! needs: identify (read dimensions) and thumbnail (crop, scale, encode,
//! persist). The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::ThumbnailParams;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning one source image into a thumbnail.
///
/// Each variant is a different fix for the operator: a permissions problem
/// on the source, a broken file, or a full or read-only cache directory.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Cannot read source image {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unsupported or corrupt image {path}: {reason}")]
    UnsupportedImage { path: PathBuf, reason: String },
    #[error("Cannot write thumbnail {path}: {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &std::path::Path) -> Result<Dimensions, BackendError>;

    /// Crop, scale and encode a thumbnail, replacing `params.output` atomically.
    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError>;
}
