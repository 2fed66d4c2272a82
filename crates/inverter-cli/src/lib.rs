//! # inverter-cli
//!
//! File I/O for the `inverter` binary. Decoding and encoding are delegated
//! to the `image` crate; the pipeline only ever sees RGBA buffers.

#![warn(missing_docs)]

pub mod io;

pub use io::{load_image, save_image, write_sidecar, EncoderSink, DEFAULT_JPEG_QUALITY};
