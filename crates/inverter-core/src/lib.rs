//! # inverter-core
//!
//! Core types for photo inversion and levels adjustment.
//!
//! - [`Image`] - RGBA buffer with copy-on-write storage
//! - [`PixelFormat`] - Channel data types (u8, u16, f16, f32) normalized to `[0, 1]`
//! - [`luminance_rec709`] - BT.709 perceptual luminance
//! - [`Error`], [`ErrorKind`], [`Result`] - Failure kinds shared by the pipeline
//!
//! ## Crate Structure
//!
//! ```text
//! inverter-core (this crate)
//!    ^
//!    |
//!    +-- inverter-ops (invert, luminance scan, levels)
//!    +-- inverter-edit (contrast controller, editing session)
//!    +-- inverter-cli (host binary)
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` - Parallel row iteration (enabled by default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, ErrorKind, Result};
pub use image::{Image, ALPHA, CHANNELS};
pub use pixel::{luminance_rec709, PixelFormat, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::image::{Image, CHANNELS};
    pub use crate::pixel::{luminance_rec709, PixelFormat};
}
