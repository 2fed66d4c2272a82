//! Error types for inverter operations.
//!
//! Every operation in the pipeline fails closed: on error no output image is
//! produced and no controller state is touched. Callers decide the fallback
//! (usually presenting the unmodified original).
//!
//! # Usage
//!
//! ```rust
//! use inverter_core::{Error, ErrorKind, Result};
//!
//! fn check_area(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_image(format!("zero area {width}x{height}")));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_area(0, 10).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidImage);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::image::Image`] - Buffer construction
//! - `inverter-ops` - Transform validation and construction
//! - `inverter-edit` - Session and controller failures

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while inverting or remapping an image.
///
/// # Categories
///
/// - **Input errors**: [`InvalidImage`](Error::InvalidImage), [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Construction errors**: [`FilterUnavailable`](Error::FilterUnavailable)
/// - **Host errors**: [`EncodingFailed`](Error::EncodingFailed)
#[derive(Debug, Error)]
pub enum Error {
    /// The image has no pixel data, zero area, or could not be read.
    #[error("invalid image: {reason}")]
    InvalidImage {
        /// Why the image was rejected
        reason: String,
    },

    /// Buffer length does not match the declared dimensions.
    ///
    /// Returned by [`crate::Image::from_data`] when the element count is not
    /// `width * height * 4`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A transform primitive could not be constructed.
    ///
    /// Raised once, at pipeline construction, for an unknown transform name
    /// or a backend that was not compiled in.
    #[error("filter unavailable: {name}")]
    FilterUnavailable {
        /// Transform or backend name
        name: String,
    },

    /// The host failed to encode or persist the rendered output.
    #[error("encoding failed: {reason}")]
    EncodingFailed {
        /// Encoder message
        reason: String,
    },
}

/// Fieldless discriminant of [`Error`], for comparing failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidImage`] and [`Error::InvalidDimensions`].
    InvalidImage,
    /// See [`Error::FilterUnavailable`].
    FilterUnavailable,
    /// See [`Error::EncodingFailed`].
    EncodingFailed,
    /// Failures outside the pipeline, such as configuration or I/O.
    Other,
}

impl Error {
    /// Creates an [`Error::InvalidImage`] error.
    #[inline]
    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::FilterUnavailable`] error.
    #[inline]
    pub fn filter_unavailable(name: impl Into<String>) -> Self {
        Self::FilterUnavailable { name: name.into() }
    }

    /// Creates an [`Error::EncodingFailed`] error.
    #[inline]
    pub fn encoding_failed(reason: impl Into<String>) -> Self {
        Self::EncodingFailed {
            reason: reason.into(),
        }
    }

    /// Returns the kind of this error.
    ///
    /// A dimension mismatch is a malformed buffer and reports as
    /// [`ErrorKind::InvalidImage`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidImage { .. } | Self::InvalidDimensions { .. } => ErrorKind::InvalidImage,
            Self::FilterUnavailable { .. } => ErrorKind::FilterUnavailable,
            Self::EncodingFailed { .. } => ErrorKind::EncodingFailed,
        }
    }

    /// Returns `true` if the input image was rejected.
    #[inline]
    pub fn is_invalid_image(&self) -> bool {
        self.kind() == ErrorKind::InvalidImage
    }
}
