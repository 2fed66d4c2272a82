//! # inverter-ops
//!
//! Pixel transforms for inverting a photograph and stretching its tonal range.
//!
//! # Modules
//!
//! - [`invert`] - Color inversion (alpha untouched)
//! - [`extrema`] - Global minimum/maximum BT.709 luminance
//! - [`levels`] - Linear black/white point stretch
//! - [`transform`] - Named, construct-once transforms
//! - [`backend`] - Serial or row-parallel execution
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_ops::{extrema, invert, levels};
//!
//! let img: Image<f32> = Image::filled(8, 8, [0.2, 0.4, 0.6, 1.0]);
//! let inverted = invert::invert(&img).unwrap();
//! let ext = extrema::scan(&inverted).unwrap();
//! let out = levels::apply(&inverted, ext.min, ext.max).unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backend;
pub mod extrema;
pub mod invert;
pub mod levels;
pub mod transform;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use backend::Backend;
pub use extrema::LuminanceExtremes;
pub use levels::{Levels, OutputRange};
pub use transform::{Transform, TransformParams};
