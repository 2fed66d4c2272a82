//! Pixel data formats and luminance.
//!
//! # Types
//!
//! - [`PixelFormat`] - Trait for channel data types (u8, u16, f16, f32)
//! - [`luminance_rec709`] - ITU-R BT.709 weighted luminance
//!
//! Integer formats are interpreted as normalized values in `[0, 1]`, so a
//! `u8` value of 255 and an `f32` value of 1.0 mean the same thing to every
//! operation in the pipeline.
//!
//! # Dependencies
//!
//! - `half` crate for `f16` support
//!
//! # Used By
//!
//! - [`crate::Image`] - image buffers store channel values
//! - `inverter-ops` - inversion, luminance scanning and level remapping

use half::f16;

// ============================================================================
// Rec.709 Luminance Constants
// ============================================================================

/// Rec.709 luminance coefficient for red channel.
///
/// Used in the standard luminance formula: `Y = 0.2126*R + 0.7152*G + 0.0722*B`
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Rec.709 luminance coefficients as an array [R, G, B].
pub const REC709_LUMA: [f32; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Calculate Rec.709 luminance from normalized RGB values.
///
/// `Y = 0.2126*R + 0.7152*G + 0.0722*B`
///
/// # Example
/// ```
/// use inverter_core::pixel::luminance_rec709;
/// let luma = luminance_rec709([0.5, 0.3, 0.2]);
/// // 0.5 * 0.2126 + 0.3 * 0.7152 + 0.2 * 0.0722 = 0.3353
/// assert!((luma - 0.3353).abs() < 0.0001);
/// ```
#[inline]
pub fn luminance_rec709(rgb: [f32; 3]) -> f32 {
    rgb[0] * REC709_LUMA_R + rgb[1] * REC709_LUMA_G + rgb[2] * REC709_LUMA_B
}

/// Trait for channel data types.
///
/// Implemented for:
/// - `u8` - 8-bit unsigned (0-255)
/// - `u16` - 16-bit unsigned (0-65535)
/// - `f16` - 16-bit float (half precision)
/// - `f32` - 32-bit float (single precision)
///
/// # Example
///
/// ```
/// use inverter_core::PixelFormat;
///
/// let byte_val: u8 = 128;
/// assert!((byte_val.to_f32() - 0.502).abs() < 0.01);
/// assert_eq!(byte_val.invert(), 127);
///
/// let back: u16 = PixelFormat::from_f32(0.5);
/// assert_eq!(back, 32768);
/// ```
pub trait PixelFormat: Copy + Clone + Default + Send + Sync + PartialOrd + std::fmt::Debug + 'static {
    /// Convert to f32.
    ///
    /// For integers, normalizes to [0.0, 1.0] range.
    /// For floats, returns the value directly.
    fn to_f32(self) -> f32;

    /// Convert from f32.
    ///
    /// Integers clamp to [0.0, 1.0] and round. Floats store the value as is,
    /// including values outside the nominal range.
    fn from_f32(v: f32) -> Self;

    /// Complement in the native range: `MAX - v` for integers, `1 - v` for floats.
    ///
    /// Exact involution for integer formats.
    fn invert(self) -> Self;

    /// Zero value.
    fn zero() -> Self;
}

impl PixelFormat for u8 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[inline]
    fn invert(self) -> Self {
        u8::MAX - self
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for u16 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 65535.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 65535.0).round() as u16
    }

    #[inline]
    fn invert(self) -> Self {
        u16::MAX - self
    }

    #[inline]
    fn zero() -> Self {
        0
    }
}

impl PixelFormat for f16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        f16::from_f32(v)
    }

    #[inline]
    fn invert(self) -> Self {
        f16::from_f32(1.0 - f16::to_f32(self))
    }

    #[inline]
    fn zero() -> Self {
        f16::ZERO
    }
}

impl PixelFormat for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn invert(self) -> Self {
        1.0 - self
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}
