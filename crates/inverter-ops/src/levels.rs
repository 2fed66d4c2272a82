//! Linear black/white point stretch.
//!
//! Maps `[black, white]` to `[0, 1]` on R, G and B with one shared slope and
//! bias, so the color balance is not skewed:
//!
//! ```text
//! slope = 1 / (white - black)
//! bias  = -black * slope
//! out   = in * slope + bias
//! ```
//!
//! When `white <= black` there is no positive span to divide by and the
//! input image is returned unchanged.
//!
//! # Output range
//!
//! By default results are clamped to `[0, 1]` ([`OutputRange::Clamp`]).
//! Float buffers may keep out-of-range values with
//! [`OutputRange::Unclamped`]; integer buffers always saturate.
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_ops::levels::apply;
//!
//! let img: Image<f32> = Image::filled(1, 1, [0.2, 0.5, 0.8, 1.0]);
//! let out = apply(&img, 0.2, 0.8).unwrap();
//! let px = out.pixel(0, 0);
//! assert!(px[0].abs() < 1e-6);
//! assert!((px[1] - 0.5).abs() < 1e-6);
//! assert!((px[2] - 1.0).abs() < 1e-6);
//! ```

use crate::backend::{self, Backend};
use inverter_core::{Image, PixelFormat, Result};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// What to do with remapped values outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputRange {
    /// Clamp to `[0, 1]`.
    #[default]
    Clamp,
    /// Leave values as computed (floats only; integers saturate anyway).
    Unclamped,
}

impl OutputRange {
    #[inline]
    fn apply(self, v: f32) -> f32 {
        match self {
            Self::Clamp => v.clamp(0.0, 1.0),
            Self::Unclamped => v,
        }
    }
}

/// Black/white point stretch parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    /// Input value mapped to 0.
    pub black: f32,
    /// Input value mapped to 1.
    pub white: f32,
    /// Handling of out-of-range results.
    pub range: OutputRange,
}

impl Default for Levels {
    fn default() -> Self {
        Self::identity()
    }
}

impl Levels {
    /// Stretch from `[black, white]` with clamped output.
    pub fn new(black: f32, white: f32) -> Self {
        Self {
            black,
            white,
            range: OutputRange::Clamp,
        }
    }

    /// The `[0, 1]` to `[0, 1]` mapping.
    pub fn identity() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Sets the output range handling.
    pub fn with_range(mut self, range: OutputRange) -> Self {
        self.range = range;
        self
    }

    /// Returns `true` if `white <= black` (or either is NaN).
    ///
    /// Degenerate levels pass images through unchanged.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.white > self.black)
    }

    /// Scale factor `1 / (white - black)`. Meaningless when degenerate.
    #[inline]
    pub fn slope(&self) -> f32 {
        1.0 / (self.white - self.black)
    }

    /// Offset `-black * slope`. Meaningless when degenerate.
    #[inline]
    pub fn bias(&self) -> f32 {
        -self.black * self.slope()
    }

    /// Remaps one normalized channel value.
    #[inline]
    pub fn map_value(&self, v: f32) -> f32 {
        if self.is_degenerate() {
            return v;
        }
        self.range.apply(v * self.slope() + self.bias())
    }
}

/// Stretches `image` from `[black, white]` to `[0, 1]` with clamped output.
///
/// # Errors
///
/// [`Error::InvalidImage`](inverter_core::Error::InvalidImage) if the image
/// has zero area or no pixel data. A degenerate interval is not an error.
pub fn apply<T: PixelFormat>(image: &Image<T>, black: f32, white: f32) -> Result<Image<T>> {
    apply_with(image, &Levels::new(black, white), Backend::Auto)
}

/// Applies `levels` to `image` on a specific backend.
///
/// A degenerate interval returns a clone of `image` that shares its buffer.
pub fn apply_with<T: PixelFormat>(image: &Image<T>, levels: &Levels, backend: Backend) -> Result<Image<T>> {
    trace!(
        width = image.width(),
        height = image.height(),
        black = levels.black,
        white = levels.white,
        "levels::apply"
    );
    image.validate("levels")?;
    if levels.is_degenerate() {
        debug!(black = levels.black, white = levels.white, "degenerate interval, passthrough");
        return Ok(image.clone());
    }
    let backend = backend.resolve()?;

    let slope = levels.slope();
    let bias = levels.bias();
    let range = levels.range;
    debug!(slope, bias, "levels stretch");

    Ok(backend::map_pixels(image, backend, move |px: &mut [T]| {
        for c in &mut px[..3] {
            *c = T::from_f32(range.apply(c.to_f32() * slope + bias));
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use inverter_core::ErrorKind;

    const EPSILON: f32 = 1e-6;

    fn ramp_f32(w: u32, h: u32) -> Image<f32> {
        let data = (0..w * h * 4).map(|i| (i % 51) as f32 / 50.0).collect();
        Image::from_data(w, h, data).unwrap()
    }

    #[test]
    fn test_slope_and_bias() {
        let levels = Levels::new(0.1, 0.9);
        assert_abs_diff_eq!(levels.slope(), 1.25, epsilon = EPSILON);
        assert_abs_diff_eq!(levels.bias(), -0.125, epsilon = EPSILON);
        assert!(!levels.is_degenerate());
    }

    #[test]
    fn test_identity_f32() {
        let img = ramp_f32(10, 6);
        let out = apply(&img, 0.0, 1.0).unwrap();
        for (a, b) in img.data().iter().zip(out.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_identity_u8_exact() {
        let data = (0..16 * 16 * 4).map(|i| (i % 256) as u8).collect();
        let img: Image<u8> = Image::from_data(16, 16, data).unwrap();
        assert_eq!(apply(&img, 0.0, 1.0).unwrap(), img);
    }

    #[test]
    fn test_inverted_interval_passthrough() {
        let img = ramp_f32(4, 4);
        for (black, white) in [(0.5, 0.5), (0.8, 0.2), (1.0, 0.0), (0.3, -0.3)] {
            let out = apply(&img, black, white).unwrap();
            assert_eq!(out, img);
            assert!(out.shares_buffer(&img));
        }
    }

    #[test]
    fn test_nan_interval_passthrough() {
        let img = ramp_f32(2, 2);
        assert_eq!(apply(&img, f32::NAN, 1.0).unwrap(), img);
    }

    #[test]
    fn test_stretch_clamps() {
        let img: Image<f32> = Image::filled(1, 1, [0.0, 0.5, 1.0, 0.25]);
        let px = apply(&img, 0.25, 0.75).unwrap().pixel(0, 0);
        assert_eq!(px[0], 0.0);
        assert_abs_diff_eq!(px[1], 0.5, epsilon = EPSILON);
        assert_eq!(px[2], 1.0);
        assert_eq!(px[3], 0.25);
    }

    #[test]
    fn test_unclamped_keeps_overshoot() {
        let img: Image<f32> = Image::filled(1, 1, [0.0, 0.5, 1.0, 1.0]);
        let levels = Levels::new(0.25, 0.75).with_range(OutputRange::Unclamped);
        let px = apply_with(&img, &levels, Backend::Serial).unwrap().pixel(0, 0);
        assert_abs_diff_eq!(px[0], -0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(px[2], 1.5, epsilon = EPSILON);
    }

    #[test]
    fn test_u8_saturates_even_unclamped() {
        let img: Image<u8> = Image::filled(1, 1, [0, 128, 255, 255]);
        let levels = Levels::new(0.25, 0.75).with_range(OutputRange::Unclamped);
        let px = apply_with(&img, &levels, Backend::Auto).unwrap().pixel(0, 0);
        assert_eq!(px[0], 0);
        assert_eq!(px[2], 255);
    }

    #[test]
    fn test_same_mapping_on_every_channel() {
        let img: Image<f32> = Image::filled(1, 1, [0.4, 0.4, 0.4, 1.0]);
        let px = apply(&img, 0.2, 0.6).unwrap().pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_abs_diff_eq!(px[0], 0.5, epsilon = EPSILON);
    }

    #[test]
    fn test_alpha_untouched() {
        let img = ramp_f32(7, 5);
        let out = apply(&img, 0.3, 0.7).unwrap();
        assert!(img.alpha().eq(out.alpha()));
    }

    #[test]
    fn test_map_value() {
        let levels = Levels::new(0.2, 0.8);
        assert_abs_diff_eq!(levels.map_value(0.5), 0.5, epsilon = EPSILON);
        assert_eq!(levels.map_value(0.0), 0.0);
        assert_eq!(Levels::new(0.8, 0.2).map_value(0.3), 0.3);
    }

    #[test]
    fn test_empty_image_rejected() {
        let img: Image<f32> = Image::new(0, 5);
        assert_eq!(apply(&img, 0.8, 0.2).unwrap_err().kind(), ErrorKind::InvalidImage);
    }

    #[test]
    fn test_serial_matches_auto() {
        let img = ramp_f32(29, 13);
        let levels = Levels::new(0.15, 0.85);
        assert_eq!(
            apply_with(&img, &levels, Backend::Serial).unwrap(),
            apply_with(&img, &levels, Backend::Auto).unwrap()
        );
    }
}
