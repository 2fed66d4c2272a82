//! RGBA image buffer.
//!
//! [`Image`] stores interleaved `[R G B A]` pixels in row-major order,
//! top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! Dimensions are fixed at construction. The buffer sits behind an [`Arc`],
//! so cloning is cheap and a passthrough result shares memory with its input
//! until one side is mutated.
//!
//! # Usage
//!
//! ```rust
//! use inverter_core::Image;
//!
//! let mut img: Image<f32> = Image::new(64, 32);
//! img.set_pixel(10, 5, [1.0, 0.5, 0.25, 1.0]);
//! assert_eq!(img.pixel(10, 5)[1], 0.5);
//! ```
//!
//! # Used By
//!
//! - `inverter-ops` - every transform reads and produces an [`Image`]
//! - `inverter-edit` - the editing session holds the host's input image

use crate::{Error, PixelFormat, Result};
use std::sync::Arc;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Index of the alpha channel within a pixel.
pub const ALPHA: usize = 3;

/// Owned RGBA image buffer.
///
/// `T` is the channel data type ([`u8`], [`u16`], [`half::f16`], [`f32`]).
/// To get a mutable exclusive copy of shared data, use [`make_mut`](Self::make_mut).
#[derive(Clone, PartialEq)]
pub struct Image<T: PixelFormat> {
    /// Pixel data buffer (Arc for cheap cloning)
    data: Arc<Vec<T>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl<T: PixelFormat> Image<T> {
    /// Creates a new image filled with zeros (transparent black).
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: Arc::new(vec![T::zero(); len]),
            width,
            height,
        }
    }

    /// Creates an image from existing interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use inverter_core::Image;
    ///
    /// let img = Image::from_data(2, 1, vec![0u8, 0, 0, 255, 255, 255, 255, 255]).unwrap();
    /// assert_eq!(img.pixel(1, 0), [255, 255, 255, 255]);
    /// assert!(Image::from_data(2, 2, vec![0u8; 3]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a single pixel value.
    pub fn filled(width: u32, height: u32, pixel: [T; CHANNELS]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Creates an image from normalized f32 RGBA pixels, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the pixel count does not match.
    pub fn from_pixels_f32(width: u32, height: u32, pixels: &[[f32; CHANNELS]]) -> Result<Self> {
        let data = pixels
            .iter()
            .flat_map(|px| px.iter().map(|&v| T::from_f32(v)))
            .collect();
        Self::from_data(width, height, data)
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area or no pixel data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }

    /// Fails with [`Error::InvalidImage`] if this image cannot be processed.
    ///
    /// `op` names the operation for the error message.
    pub fn validate(&self, op: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::invalid_image(format!(
                "{op}: image has no pixel data ({}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Returns a reference to the raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable reference to the raw data.
    ///
    /// Clones the buffer first if it is shared (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Ensures this image has exclusive ownership of its data.
    #[inline]
    pub fn make_mut(&mut self) {
        let _ = Arc::make_mut(&mut self.data);
    }

    /// Returns `true` if both images share the same underlying buffer.
    #[inline]
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; CHANNELS] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [T::zero(); CHANNELS];
        result.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        result
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[T; CHANNELS]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [T; CHANNELS]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + CHANNELS].copy_from_slice(&pixel);
    }

    /// Length of one row in elements.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns a row of pixels as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Iterates over all pixels as `[R, G, B, A]` chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    /// Iterates over the alpha channel.
    pub fn alpha(&self) -> impl Iterator<Item = T> + '_ {
        self.data.chunks_exact(CHANNELS).map(|px| px[ALPHA])
    }

    /// Applies a function to every pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn([T; CHANNELS]) -> [T; CHANNELS],
    {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(CHANNELS) {
            let mut px = [T::zero(); CHANNELS];
            px.copy_from_slice(chunk);
            chunk.copy_from_slice(&f(px));
        }
    }

    /// Converts to a different channel data type.
    pub fn convert_format<T2: PixelFormat>(&self) -> Image<T2> {
        let data = self.data.iter().map(|&v| T2::from_f32(v.to_f32())).collect();
        Image {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(feature = "rayon")]
impl<T: PixelFormat> Image<T> {
    /// Parallel iterator over rows.
    pub fn par_rows(&self) -> rayon::slice::ChunksExact<'_, T> {
        use rayon::prelude::*;
        let len = self.row_len().max(1);
        self.data.par_chunks_exact(len)
    }

    /// Parallel mutable iterator over rows.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, T> {
        use rayon::prelude::*;
        let len = self.row_len().max(1);
        Arc::make_mut(&mut self.data).par_chunks_exact_mut(len)
    }
}

impl Image<u8> {
    /// Wraps an 8-bit RGBA buffer as produced by most decoders.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, data)
    }
}

impl<T: PixelFormat> Image<T> {
    /// Converts to an interleaved 8-bit RGBA buffer for encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().map(|&v| u8::from_f32(v.to_f32())).collect()
    }
}

impl<T: PixelFormat> std::fmt::Debug for Image<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &std::any::type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_new() {
        let img: Image<f32> = Image::new(100, 50);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.data().len(), 100 * 50 * 4);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_image_filled() {
        let img: Image<u8> = Image::filled(3, 2, [10, 20, 30, 40]);
        assert!(img.pixels().all(|px| px == [10, 20, 30, 40]));
    }

    #[test]
    fn test_image_set_get_pixel() {
        let mut img: Image<f32> = Image::new(10, 10);
        img.set_pixel(5, 5, [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(img.pixel(5, 5), [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(img.get_pixel(10, 0), None);
    }

    #[test]
    fn test_image_from_data_wrong_size() {
        let result: Result<Image<f32>> = Image::from_data(10, 10, vec![0.0; 99]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_area_is_invalid() {
        let img: Image<u8> = Image::new(0, 10);
        assert!(img.is_empty());
        let err = img.validate("invert").unwrap_err();
        assert!(err.is_invalid_image());
        assert!(err.to_string().contains("invert"));
    }

    #[test]
    fn test_image_map_pixels() {
        let mut img: Image<f32> = Image::filled(4, 4, [0.5, 0.5, 0.5, 1.0]);
        img.map_pixels(|[r, g, b, a]| [r * 2.0, g, b, a]);
        assert_eq!(img.pixel(3, 3), [1.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_image_convert_format() {
        let img: Image<f32> = Image::filled(2, 2, [1.0, 0.0, 0.5, 1.0]);
        let bytes: Image<u8> = img.convert_format();
        assert_eq!(bytes.pixel(0, 0), [255, 0, 128, 255]);
    }

    #[test]
    fn test_image_clone_cow() {
        let img: Image<f32> = Image::filled(4, 4, [0.5; 4]);
        let mut copy = img.clone();
        assert!(copy.shares_buffer(&img));
        copy.set_pixel(0, 0, [1.0; 4]);
        assert!(!copy.shares_buffer(&img));
        assert_eq!(img.pixel(0, 0), [0.5; 4]);
    }

    #[test]
    fn test_image_row() {
        let mut img: Image<u8> = Image::new(3, 2);
        img.set_pixel(1, 1, [1, 2, 3, 4]);
        assert_eq!(img.row(1), &[0, 0, 0, 0, 1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_rows() {
        use rayon::prelude::*;
        let img: Image<u8> = Image::filled(5, 7, [1, 1, 1, 1]);
        assert_eq!(img.par_rows().count(), 7);
    }
}
