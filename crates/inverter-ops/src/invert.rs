//! Color inversion.
//!
//! Each of R, G and B is replaced by its complement in the buffer's native
//! range (`255 - v` for `u8`, `1 - v` for `f32`). Alpha is copied through.
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_ops::invert::invert;
//!
//! let img: Image<u8> = Image::filled(2, 2, [255, 128, 0, 200]);
//! let out = invert(&img).unwrap();
//! assert_eq!(out.pixel(0, 0), [0, 127, 255, 200]);
//! ```

use crate::backend::{self, Backend};
use inverter_core::{Image, PixelFormat, Result};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Inverts every color channel of `image` using the best available backend.
///
/// # Errors
///
/// [`Error::InvalidImage`](inverter_core::Error::InvalidImage) if the image
/// has zero area or no pixel data.
pub fn invert<T: PixelFormat>(image: &Image<T>) -> Result<Image<T>> {
    invert_with(image, Backend::Auto)
}

/// Inverts every color channel of `image` on a specific backend.
pub fn invert_with<T: PixelFormat>(image: &Image<T>, backend: Backend) -> Result<Image<T>> {
    trace!(width = image.width(), height = image.height(), backend = backend.name(), "invert");
    image.validate("invert")?;
    let backend = backend.resolve()?;
    Ok(backend::map_pixels(image, backend, invert_pixel))
}

/// Inverts R, G and B of one interleaved pixel, leaving alpha alone.
#[inline]
pub fn invert_pixel<T: PixelFormat>(px: &mut [T]) {
    px[0] = px[0].invert();
    px[1] = px[1].invert();
    px[2] = px[2].invert();
}
