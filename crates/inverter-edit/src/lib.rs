//! # inverter-edit
//!
//! Contrast controller and editing session for the photo inverter.
//!
//! - [`ContrastController`] - Auto/manual mode, black/white point, pipeline run
//! - [`EditingSession`] - Start, preview, commit and cancel one edit
//! - [`PipelineConfig`] - Settings, loadable from YAML
//! - [`AdjustmentData`] - Metadata written with a committed edit
//! - [`SharedController`] - Mutex-guarded handle for multi-threaded hosts
//!
//! # Example
//!
//! ```rust
//! use inverter_core::Image;
//! use inverter_edit::{EditingSession, MemorySink, PipelineConfig};
//!
//! let img: Image<u8> = Image::filled(4, 4, [30, 60, 90, 255]);
//! let mut session = EditingSession::start(img, &PipelineConfig::default()).unwrap();
//! let out = session.finish(&mut MemorySink::new()).unwrap();
//! assert!(out.adjustment.is_own_format());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjustment;
pub mod config;
pub mod controller;
pub mod error;
pub mod point;
pub mod session;
pub mod shared;

pub use adjustment::{AdjustmentData, FORMAT_IDENTIFIER, FORMAT_VERSION};
pub use config::{PipelineConfig, PipelineConfigBuilder, DEFAULT_SLIDER_SCALE};
pub use controller::{ContrastController, ControllerState};
pub use error::{EditError, EditResult};
pub use point::{ColorPoint, Mode};
pub use session::{EditOutput, EditingSession, MemorySink, RenderedContentSink};
pub use shared::SharedController;
