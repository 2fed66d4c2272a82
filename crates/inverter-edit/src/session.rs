//! Editing session lifecycle.
//!
//! An [`EditingSession`] receives one full-size input image, lets the host
//! preview the adjustment any number of times and commits the result once
//! through a [`RenderedContentSink`]:
//!
//! ```text
//! start(input) ─► preview()* ─► finish(sink) ─► EditOutput
//!       │                          │
//!       └────────── cancel() ◄─────┘ (on error, session stays usable)
//! ```
//!
//! Prior adjustment data is never honored: [`EditingSession::can_handle`]
//! always reports `false`, so every edit is recomputed from the freshest
//! source image.

use crate::adjustment::AdjustmentData;
use crate::config::PipelineConfig;
use crate::controller::ContrastController;
use crate::error::{EditError, EditResult};
use crate::point::ColorPoint;
use inverter_core::{Error, Image, PixelFormat};
use std::fmt::Display;
use tracing::{info, warn};

/// Host-side destination for the rendered image, usually an encoder.
pub trait RenderedContentSink<T: PixelFormat> {
    /// Error returned when the image cannot be written.
    type Error: Display;

    /// Encodes and stores `image`.
    fn write_rendered(&mut self, image: &Image<T>) -> Result<(), Self::Error>;
}

/// Sink that keeps the last rendered image in memory.
#[derive(Debug, Default)]
pub struct MemorySink<T: PixelFormat> {
    /// Last image written, if any.
    pub image: Option<Image<T>>,
}

impl<T: PixelFormat> MemorySink<T> {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self { image: None }
    }
}

impl<T: PixelFormat> RenderedContentSink<T> for MemorySink<T> {
    type Error = std::convert::Infallible;

    fn write_rendered(&mut self, image: &Image<T>) -> Result<(), Self::Error> {
        self.image = Some(image.clone());
        Ok(())
    }
}

/// Result of a committed edit.
#[derive(Debug, Clone)]
pub struct EditOutput<T: PixelFormat> {
    /// Rendered full-size image.
    pub image: Image<T>,
    /// Metadata to store alongside the asset.
    pub adjustment: AdjustmentData,
    /// Black/white point the image was rendered with.
    pub point: ColorPoint,
}

/// One editing session over a single input image.
#[derive(Debug)]
pub struct EditingSession<T: PixelFormat> {
    controller: ContrastController,
    input: Option<Image<T>>,
}

impl<T: PixelFormat> EditingSession<T> {
    /// Creates a session without an input image.
    pub fn new(config: &PipelineConfig) -> EditResult<Self> {
        Ok(Self {
            controller: ContrastController::new(config)?,
            input: None,
        })
    }

    /// Creates a session and loads `input`.
    pub fn start(input: Image<T>, config: &PipelineConfig) -> EditResult<Self> {
        let mut session = Self::new(config)?;
        session.load(input)?;
        Ok(session)
    }

    /// Replaces the held input image.
    ///
    /// # Errors
    ///
    /// `InvalidImage` if `input` has no pixel data. The previous input is kept.
    pub fn load(&mut self, input: Image<T>) -> EditResult<()> {
        input.validate("start")?;
        info!(width = input.width(), height = input.height(), "editing session started");
        self.input = Some(input);
        Ok(())
    }

    /// Always `false`: edits are never resumed from prior adjustment data.
    pub fn can_handle(&self, adjustment: &AdjustmentData) -> bool {
        if adjustment.is_own_format() {
            info!(version = %adjustment.format_version, "ignoring prior adjustment data");
        }
        false
    }

    /// `true` once an input image is loaded.
    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Held input image.
    pub fn input(&self) -> Option<&Image<T>> {
        self.input.as_ref()
    }

    /// Controller for reading and setting mode and point.
    pub fn controller(&self) -> &ContrastController {
        &self.controller
    }

    /// Mutable controller access for UI bindings.
    pub fn controller_mut(&mut self) -> &mut ContrastController {
        &mut self.controller
    }

    /// Renders the held input with the current settings without committing.
    pub fn preview(&mut self) -> EditResult<Image<T>> {
        let input = self.input.as_ref().ok_or(EditError::NoInput)?;
        Ok(self.controller.process(input)?)
    }

    /// Renders the held input, writes it to `sink` and returns the commit.
    ///
    /// Adjustment data is produced only after the sink accepts the image.
    /// If rendering or the sink fails, the controller is restored to its
    /// state before the call.
    ///
    /// # Errors
    ///
    /// [`EditError::NoInput`] without an input, `InvalidImage` from the
    /// pipeline, or `EncodingFailed` if the sink rejects the image.
    pub fn finish<S>(&mut self, sink: &mut S) -> EditResult<EditOutput<T>>
    where
        S: RenderedContentSink<T>,
    {
        let input = self.input.as_ref().ok_or(EditError::NoInput)?;
        let saved = self.controller.state();

        let image = self.controller.process(input)?;
        if let Err(e) = sink.write_rendered(&image) {
            warn!(error = %e, "rendered output rejected");
            self.controller.restore(saved);
            return Err(Error::encoding_failed(e.to_string()).into());
        }

        let point = self.controller.point();
        info!(black = point.black(), white = point.white(), "edit committed");
        Ok(EditOutput {
            image,
            adjustment: AdjustmentData::inversion_marker(),
            point,
        })
    }

    /// Drops the held input.
    pub fn cancel(&mut self) {
        if self.input.take().is_some() {
            info!("editing session cancelled");
        }
    }

    /// Always `false`: nothing is lost by cancelling.
    pub fn should_show_cancel_confirmation(&self) -> bool {
        false
    }
}
