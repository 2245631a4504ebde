//! Square thumbnails, cached by content.
//!
//! [`ThumbnailEngine::generate`] turns a source image into a centered,
//! square, `size × size` thumbnail in the cache directory and returns the
//! path markup should use to reference it.
//!
//! ```text
//! source bytes ──sha256──▶ {size}-{hash}.{ext}
//!                              │
//!                 exists? ─────┴──── yes → return path (no decode)
//!                    │ no
//!          identify → square_crop → backend.thumbnail (crop, scale, encode, rename)
//! ```
//!
//! The output keeps the source's codec and extension. Because the name only
//! depends on the bytes and the size, two concurrent generators of the same
//! thumbnail write identical content and the rename makes the last one win.

use crate::cache::{self, CacheStats};
use crate::classify::detect_format;
use crate::imaging::{BackendError, ImageBackend, Quality, ThumbnailParams, square_crop};
use log::debug;
use std::path::{Path, PathBuf};

/// A thumbnail that is ready on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Path for use in markup: `{public_prefix}/{file_name}`.
    pub relative_path: String,
    /// Whether an existing file was reused instead of encoding.
    pub cached: bool,
}

/// Creates and reuses thumbnails in one cache directory.
pub struct ThumbnailEngine<B> {
    backend: B,
    cache_dir: PathBuf,
    public_prefix: String,
}

impl<B: ImageBackend> ThumbnailEngine<B> {
    /// `public_prefix` is prepended to file names in returned paths; see
    /// [`crate::config::public_prefix`].
    pub fn new(backend: B, cache_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            backend,
            cache_dir: cache_dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Return the relative path of the `size` px thumbnail for `source`,
    /// encoding it first if it is not cached yet.
    pub fn generate(
        &self,
        source: &Path,
        size: u32,
        quality: Quality,
    ) -> Result<String, BackendError> {
        self.ensure(source, size, quality)
            .map(|thumb| thumb.relative_path)
    }

    /// Like [`generate`](Self::generate), also reporting whether the
    /// thumbnail was already cached.
    pub fn ensure(
        &self,
        source: &Path,
        size: u32,
        quality: Quality,
    ) -> Result<Thumbnail, BackendError> {
        let hash = cache::hash_file(source).map_err(|e| BackendError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;

        let extension = match source.extension() {
            Some(ext) => ext.to_string_lossy().into_owned(),
            None => detect_format(source)
                .ok_or_else(|| not_an_image(source))?
                .extension()
                .to_string(),
        };
        let file_name = cache::thumbnail_filename(size, &hash, &extension);
        let relative_path = self.relative(&file_name);
        let destination = self.cache_dir.join(&file_name);

        if destination.exists() {
            debug!("thumbnail cache hit: {}", destination.display());
            return Ok(Thumbnail {
                relative_path,
                cached: true,
            });
        }

        let format = detect_format(source).ok_or_else(|| not_an_image(source))?;
        let dims = self.backend.identify(source)?;
        let params = ThumbnailParams {
            source: source.to_path_buf(),
            output: destination,
            crop: square_crop(dims.width, dims.height),
            size,
            format,
            quality,
        };
        self.backend.thumbnail(&params)?;
        debug!("encoded thumbnail {}", params.output.display());

        Ok(Thumbnail {
            relative_path,
            cached: false,
        })
    }

    /// Generate and tally the outcome into `stats`.
    pub(crate) fn ensure_counted(
        &self,
        source: &Path,
        size: u32,
        quality: Quality,
        stats: &mut CacheStats,
    ) -> Result<String, BackendError> {
        let thumb = self.ensure(source, size, quality)?;
        if thumb.cached {
            stats.hit();
        } else {
            stats.miss();
        }
        Ok(thumb.relative_path)
    }

    fn relative(&self, file_name: &str) -> String {
        if self.public_prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.public_prefix.trim_end_matches('/'), file_name)
        }
    }
}

fn not_an_image(path: &Path) -> BackendError {
    BackendError::UnsupportedImage {
        path: path.to_path_buf(),
        reason: "not a JPEG, PNG or GIF".to_string(),
    }
}
