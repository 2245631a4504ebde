//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the thumbnail engine (which decides names, sizes and
//! crops) and the [`backend`](super::backend) (which does the pixel work).
//! This separation allows swapping backends (e.g. for testing with a mock)
//! without changing the caching logic.

use super::calculations::CropRect;
use crate::classify::SupportedFormat;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Parameters for a square thumbnail: crop a region, scale it to `size`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Region of the source kept before scaling.
    pub crop: CropRect,
    /// Edge length of the square output.
    pub size: u32,
    /// Codec used for the output; always the source's own format.
    pub format: SupportedFormat,
    pub quality: Quality,
}
