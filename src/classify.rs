//! Content-based image detection.
//!
//! A file counts as a gallery image when its leading bytes carry a JPEG, PNG
//! or GIF signature. The file name plays no part: `notes.jpg` holding text is
//! rejected and an extensionless PNG is accepted.

use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes inspected. Covers every signature `image` knows.
const SIGNATURE_LEN: u64 = 16;

/// The raster formats the gallery reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedFormat {
    Jpeg,
    Png,
    Gif,
}

impl SupportedFormat {
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::Gif => ImageFormat::Gif,
        }
    }

    /// Canonical file extension, used when a source file has none.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }
}

/// Detect the format of a file from its signature.
///
/// Returns `None` for directories, unreadable files, files too short to
/// carry a signature, and every format outside [`SupportedFormat`].
pub fn detect_format(path: &Path) -> Option<SupportedFormat> {
    if !path.is_file() {
        return None;
    }
    let file = File::open(path).ok()?;
    let mut header = Vec::with_capacity(SIGNATURE_LEN as usize);
    file.take(SIGNATURE_LEN).read_to_end(&mut header).ok()?;
    image::guess_format(&header)
        .ok()
        .and_then(SupportedFormat::from_image_format)
}

/// Whether `path` is a JPEG, PNG or GIF by content.
pub fn is_supported_image(path: &Path) -> bool {
    detect_format(path).is_some()
}
