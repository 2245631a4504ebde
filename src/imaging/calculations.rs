//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// A rectangular region of a source image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Calculate the centered square region of a `width × height` image.
///
/// The longer axis loses equal margins on both sides; an odd surplus puts
/// the extra pixel on the leading edge (`offset = ceil(surplus / 2)`).
///
/// ```
/// # use snapgal::imaging::square_crop;
/// let crop = square_crop(200, 100);
/// assert_eq!((crop.x, crop.y, crop.width, crop.height), (50, 0, 100, 100));
/// ```
pub fn square_crop(width: u32, height: u32) -> CropRect {
    if width > height {
        CropRect {
            x: (width - height).div_ceil(2),
            y: 0,
            width: height,
            height,
        }
    } else if height > width {
        CropRect {
            x: 0,
            y: (height - width).div_ceil(2),
            width,
            height: width,
        }
    } else {
        CropRect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}
