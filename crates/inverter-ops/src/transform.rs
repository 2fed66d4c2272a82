//! Named transform construction.
//!
//! Hosts look transforms up by name once, when a pipeline is built. An
//! unknown name (or a backend that was not compiled in) fails right there
//! with [`Error::FilterUnavailable`]; applying a constructed [`Transform`]
//! never repeats the lookup.
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_ops::transform::{Transform, TransformParams};
//!
//! let invert = Transform::named("color-invert", TransformParams::default()).unwrap();
//! let img: Image<u8> = Image::filled(1, 1, [0, 0, 0, 255]);
//! assert_eq!(invert.apply(&img).unwrap().pixel(0, 0), [255, 255, 255, 255]);
//!
//! assert!(Transform::named("sepia", TransformParams::default()).is_err());
//! ```

use crate::backend::Backend;
use crate::levels::{Levels, OutputRange};
use crate::{invert, levels};
use inverter_core::{Error, Image, PixelFormat, Result};

/// Name of the color inversion transform.
pub const COLOR_INVERT: &str = "color-invert";

/// Name of the levels stretch transform.
pub const LEVELS: &str = "levels";

/// All transform names accepted by [`Transform::named`].
pub const TRANSFORM_NAMES: &[&str] = &[COLOR_INVERT, LEVELS];

/// Construction parameters for [`Transform::named`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformParams {
    /// Levels parameters (ignored by `color-invert`).
    pub levels: Levels,
    /// Execution backend.
    pub backend: Backend,
}

/// A constructed, ready-to-apply image transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Invert R, G and B.
    ColorInvert {
        /// Resolved backend.
        backend: Backend,
    },
    /// Black/white point stretch.
    Levels {
        /// Stretch parameters.
        levels: Levels,
        /// Resolved backend.
        backend: Backend,
    },
}

impl Transform {
    /// Looks up a transform by name and resolves its backend.
    ///
    /// # Errors
    ///
    /// [`Error::FilterUnavailable`] for an unknown name or an unavailable backend.
    pub fn named(name: &str, params: TransformParams) -> Result<Self> {
        let backend = params.backend.resolve()?;
        match name {
            COLOR_INVERT => Ok(Self::ColorInvert { backend }),
            LEVELS => Ok(Self::Levels {
                levels: params.levels,
                backend,
            }),
            other => Err(Error::filter_unavailable(format!(
                "'{other}' (known: {})",
                TRANSFORM_NAMES.join(", ")
            ))),
        }
    }

    /// Color inversion on the best available backend.
    pub fn color_invert() -> Result<Self> {
        Self::named(COLOR_INVERT, TransformParams::default())
    }

    /// Levels stretch on the best available backend.
    pub fn levels(black: f32, white: f32, range: OutputRange) -> Result<Self> {
        Self::named(
            LEVELS,
            TransformParams {
                levels: Levels::new(black, white).with_range(range),
                backend: Backend::Auto,
            },
        )
    }

    /// Name this transform was constructed under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorInvert { .. } => COLOR_INVERT,
            Self::Levels { .. } => LEVELS,
        }
    }

    /// Backend the transform runs on.
    pub fn backend(&self) -> Backend {
        match self {
            Self::ColorInvert { backend } | Self::Levels { backend, .. } => *backend,
        }
    }

    /// Returns a copy of a levels transform with new black/white points.
    ///
    /// Inversion is returned unchanged.
    pub fn with_points(self, black: f32, white: f32) -> Self {
        match self {
            Self::Levels { levels, backend } => Self::Levels {
                levels: Levels { black, white, ..levels },
                backend,
            },
            other => other,
        }
    }

    /// Applies the transform to `image`.
    pub fn apply<T: PixelFormat>(&self, image: &Image<T>) -> Result<Image<T>> {
        match self {
            Self::ColorInvert { backend } => invert::invert_with(image, *backend),
            Self::Levels { levels, backend } => levels::apply_with(image, levels, *backend),
        }
    }
}
