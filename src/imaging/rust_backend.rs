//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF) | `image` crate, format sniffed from content |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Resize | `image::DynamicImage::resize_exact` with `Triangle` filter |
//! | Encode | `JpegEncoder` (with quality), PNG and GIF lossless |
//! | Persist | `tempfile::NamedTempFile` in the target dir, then rename |
//!
//! The `Triangle` filter is a pure weighted average of neighbouring source
//! pixels, which keeps small thumbnails free of aliasing without the ringing
//! of windowed-sinc filters.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Quality, ThumbnailParams};
use crate::classify::SupportedFormat;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn unreadable(path: &Path, source: std::io::Error) -> BackendError {
    BackendError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    }
}

fn unsupported(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::UnsupportedImage {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn write_failed(path: &Path, source: std::io::Error) -> BackendError {
    BackendError::CacheWriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

/// Load and decode an image from disk.
///
/// The whole file is read up front so that any later decode failure is
/// about the data, never about the filesystem.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    let bytes = std::fs::read(path).map_err(|e| unreadable(path, e))?;
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| unreadable(path, e))?
        .decode()
        .map_err(|e| unsupported(path, e))
}

fn encode<W: Write + Seek>(
    img: &DynamicImage,
    writer: &mut W,
    format: SupportedFormat,
    quality: Quality,
) -> image::ImageResult<()> {
    match format {
        SupportedFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            rgb.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.value()))
        }
        SupportedFormat::Png => img.write_to(writer, format.image_format()),
        SupportedFormat::Gif => {
            DynamicImage::ImageRgba8(img.to_rgba8()).write_to(writer, format.image_format())
        }
    }
}

/// Encode into a temp file next to `path`, then rename it into place.
///
/// Readers see either the previous file or the complete new one.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: SupportedFormat,
    quality: Quality,
) -> Result<(), BackendError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failed(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(img, &mut writer, format, quality).map_err(|e| match e {
            ImageError::IoError(source) => write_failed(path, source),
            other => unsupported(path, other),
        })?;
        writer.flush().map_err(|e| write_failed(path, e))?;
    }
    tmp.persist(path).map_err(|e| write_failed(path, e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let file = std::fs::File::open(path).map_err(|e| unreadable(path, e))?;
        let (width, height) = ImageReader::new(std::io::BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| unreadable(path, e))?
            .into_dimensions()
            .map_err(|e| unsupported(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn thumbnail(&self, params: &ThumbnailParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        let crop = params.crop;
        if crop.x + crop.width > img.width() || crop.y + crop.height > img.height() {
            return Err(unsupported(
                &params.source,
                format!(
                    "crop {}x{}+{}+{} exceeds decoded size {}x{}",
                    crop.width,
                    crop.height,
                    crop.x,
                    crop.y,
                    img.width(),
                    img.height()
                ),
            ));
        }

        let square = img
            .crop_imm(crop.x, crop.y, crop.width, crop.height)
            .resize_exact(params.size, params.size, FilterType::Triangle);

        save_image(&square, &params.output, params.format, params.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::calculations::square_crop;
    use crate::test_helpers::{write_test_gif, write_test_jpeg, write_test_png};
    use image::ImageFormat;
    use tempfile::TempDir;

    fn params_for(
        source: &Path,
        output: &Path,
        dims: (u32, u32),
        size: u32,
        format: SupportedFormat,
    ) -> ThumbnailParams {
        ThumbnailParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            crop: square_crop(dims.0, dims.1),
            size,
            format,
            quality: Quality::default(),
        }
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        write_test_jpeg(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_nonexistent_file_is_source_unreadable() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::SourceUnreadable { .. })));
    }

    #[test]
    fn identify_garbage_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a png body").unwrap();

        let result = RustBackend::new().identify(&path);
        assert!(matches!(result, Err(BackendError::UnsupportedImage { .. })));
    }

    #[test]
    fn thumbnail_jpeg_is_square_jpeg() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("wide.jpg");
        write_test_jpeg(&source, 200, 100);
        let output = tmp.path().join("thumb.jpg");

        RustBackend::new()
            .thumbnail(&params_for(&source, &output, (200, 100), 50, SupportedFormat::Jpeg))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
        let thumb = image::load_from_memory(&bytes).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (50, 50));
    }

    #[test]
    fn thumbnail_png_portrait() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("tall.png");
        write_test_png(&source, 60, 120);
        let output = tmp.path().join("thumb.png");

        RustBackend::new()
            .thumbnail(&params_for(&source, &output, (60, 120), 40, SupportedFormat::Png))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let thumb = image::load_from_memory(&bytes).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (40, 40));
    }

    #[test]
    fn thumbnail_gif_keeps_gif_codec() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("anim.gif");
        write_test_gif(&source, 30, 30);
        let output = tmp.path().join("thumb.gif");

        RustBackend::new()
            .thumbnail(&params_for(&source, &output, (30, 30), 16, SupportedFormat::Gif))
            .unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn thumbnail_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        write_test_png(&source, 10, 10);
        let out_dir = tmp.path().join("cache");
        std::fs::create_dir(&out_dir).unwrap();
        let output = out_dir.join("thumb.png");

        RustBackend::new()
            .thumbnail(&params_for(&source, &output, (10, 10), 5, SupportedFormat::Png))
            .unwrap();

        let names: Vec<_> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("thumb.png")]);
    }

    #[test]
    fn thumbnail_missing_cache_dir_is_write_failure() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("src.png");
        write_test_png(&source, 10, 10);
        let output = tmp.path().join("no-such-dir/thumb.png");

        let result = RustBackend::new().thumbnail(&params_for(
            &source,
            &output,
            (10, 10),
            5,
            SupportedFormat::Png,
        ));
        assert!(matches!(result, Err(BackendError::CacheWriteFailed { .. })));
    }

    #[test]
    fn thumbnail_corrupt_source_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("bad.jpg");
        std::fs::write(&source, b"\xFF\xD8\xFF\xE0 truncated").unwrap();
        let output = tmp.path().join("thumb.jpg");

        let result = RustBackend::new().thumbnail(&params_for(
            &source,
            &output,
            (10, 10),
            5,
            SupportedFormat::Jpeg,
        ));
        assert!(matches!(result, Err(BackendError::UnsupportedImage { .. })));
        assert!(!output.exists());
    }
}
