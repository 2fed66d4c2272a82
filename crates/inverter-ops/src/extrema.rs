//! Global luminance extrema.
//!
//! Scans every pixel and returns the minimum and maximum BT.709 luminance
//! of the image. This is an exact global reduction: the parallel path folds
//! rows independently and merges with `min`/`max`, which are commutative,
//! so it reports exactly what a serial scan would.
//!
//! A uniform image yields `min == max`. That is a valid result; callers
//! that stretch between the two values must handle the empty interval.
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_ops::extrema::scan;
//!
//! let mut img: Image<f32> = Image::filled(4, 4, [0.5, 0.5, 0.5, 1.0]);
//! img.set_pixel(0, 0, [0.2, 0.2, 0.2, 1.0]);
//! let ext = scan(&img).unwrap();
//! assert!((ext.min - 0.2).abs() < 1e-6);
//! assert!((ext.max - 0.5).abs() < 1e-6);
//! ```

use crate::backend::{self, Backend};
use inverter_core::{luminance_rec709, Image, PixelFormat, Result};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Minimum and maximum luminance of an image, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceExtremes {
    /// Darkest pixel luminance.
    pub min: f32,
    /// Brightest pixel luminance.
    pub max: f32,
}

impl LuminanceExtremes {
    /// Returns `true` if every pixel has the same luminance.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.min == self.max
    }

    /// Extremes of the color-inverted image: `(1 - max, 1 - min)`.
    #[inline]
    pub fn inverted(&self) -> Self {
        Self {
            min: 1.0 - self.max,
            max: 1.0 - self.min,
        }
    }
}

/// Luminance of one interleaved pixel from its normalized channel values.
#[inline]
pub fn pixel_luminance<T: PixelFormat>(px: &[T]) -> f32 {
    luminance_rec709([px[0].to_f32(), px[1].to_f32(), px[2].to_f32()])
}

/// Scans `image` for its luminance extremes using the best available backend.
///
/// # Errors
///
/// [`Error::InvalidImage`](inverter_core::Error::InvalidImage) if the image
/// has zero area or no pixel data.
pub fn scan<T: PixelFormat>(image: &Image<T>) -> Result<LuminanceExtremes> {
    scan_with(image, Backend::Auto)
}

/// Scans `image` for its luminance extremes on a specific backend.
///
/// Float buffers may hold values outside `[0, 1]`; the reported extremes
/// are clamped into that range.
pub fn scan_with<T: PixelFormat>(image: &Image<T>, backend: Backend) -> Result<LuminanceExtremes> {
    trace!(width = image.width(), height = image.height(), backend = backend.name(), "scan");
    image.validate("scan")?;
    let backend = backend.resolve()?;

    let (min, max) = backend::fold_pixels(
        image,
        backend,
        (f32::INFINITY, f32::NEG_INFINITY),
        |(lo, hi), px| {
            let y = pixel_luminance(px);
            (lo.min(y), hi.max(y))
        },
        |(lo_a, hi_a), (lo_b, hi_b)| (lo_a.min(lo_b), hi_a.max(hi_b)),
    );

    // Only NaN pixels leave the fold at its identity.
    let (min, max) = if min > max { (0.0, 0.0) } else { (min, max) };
    let ext = LuminanceExtremes {
        min: min.clamp(0.0, 1.0),
        max: max.clamp(0.0, 1.0),
    };
    debug!(min = ext.min, max = ext.max, "luminance extremes");
    Ok(ext)
}
