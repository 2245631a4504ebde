//! Image processing in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Square crop** | [`square_crop`] + `crop_imm` |
//! | **Resize** | `resize_exact`, `Triangle` filter |
//! | **Encode** | source codec: JPEG (quality), PNG, GIF |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{CropRect, square_crop};
pub use params::{Quality, ThumbnailParams};
pub use rust_backend::RustBackend;
