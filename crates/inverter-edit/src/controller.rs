//! Auto/manual contrast controller.
//!
//! [`ContrastController`] owns the session's [`Mode`] and [`ColorPoint`] and
//! runs the pipeline:
//!
//! ```text
//! original ─► invert ─► inverted ─┬─► (Auto) scan extremes ─► point
//!                                 │
//!                                 └─► levels(point) ─► result
//! ```
//!
//! UI bindings read and write through the controller only. Slider clamping
//! lives in [`set_black`](ContrastController::set_black) and
//! [`set_white`](ContrastController::set_white).

use crate::config::PipelineConfig;
use crate::error::EditResult;
use crate::point::{ColorPoint, Mode};
use inverter_core::{Image, PixelFormat, Result};
use inverter_ops::{extrema, transform, Levels, Transform, TransformParams};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Saved mode and point, for rolling back a failed commit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Mode at snapshot time.
    pub mode: Mode,
    /// Point at snapshot time.
    pub point: ColorPoint,
}

/// Holds the contrast mode and black/white point and runs the pipeline.
///
/// # Example
///
/// ```rust
/// use inverter_core::Image;
/// use inverter_edit::{ContrastController, PipelineConfig};
///
/// let mut ctl = ContrastController::new(&PipelineConfig::default()).unwrap();
/// let mut img: Image<f32> = Image::filled(2, 1, [0.8, 0.8, 0.8, 1.0]);
/// img.set_pixel(1, 0, [0.2, 0.2, 0.2, 1.0]);
///
/// let out = ctl.process(&img).unwrap();
/// assert!((ctl.point().black() - 0.2).abs() < 1e-5);
/// assert!(out.pixel(0, 0)[0] < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct ContrastController {
    mode: Mode,
    point: ColorPoint,
    slider_scale: f32,
    invert: Transform,
    levels: Transform,
}

impl ContrastController {
    /// Builds the controller and constructs both transforms once.
    ///
    /// # Errors
    ///
    /// [`EditError::Config`](crate::EditError::Config) for invalid settings,
    /// or `FilterUnavailable` if the backend cannot be used.
    pub fn new(config: &PipelineConfig) -> EditResult<Self> {
        let point = config.validate()?;
        let params = TransformParams {
            levels: Levels::new(point.black(), point.white()).with_range(config.output_range),
            backend: config.backend,
        };
        let invert = Transform::named(transform::COLOR_INVERT, params)?;
        let levels = Transform::named(transform::LEVELS, params)?;
        debug!(mode = %config.mode, backend = invert.backend().name(), "contrast controller ready");
        Ok(Self {
            mode: config.mode,
            point,
            slider_scale: config.slider_scale,
            invert,
            levels,
        })
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current black/white point.
    ///
    /// In Auto mode this is the point computed by the last successful
    /// [`process`](Self::process).
    #[inline]
    pub fn point(&self) -> ColorPoint {
        self.point
    }

    /// Current point in slider units.
    pub fn slider_values(&self) -> (f32, f32) {
        self.point.to_slider(self.slider_scale)
    }

    /// Full-scale slider value.
    #[inline]
    pub fn slider_scale(&self) -> f32 {
        self.slider_scale
    }

    /// Switches mode. Does not recompute anything by itself.
    pub fn set_mode(&mut self, mode: Mode) {
        trace!(from = %self.mode, to = %mode, "set_mode");
        self.mode = mode;
    }

    /// Moves the black point (Manual mode only), stopping at the white point.
    ///
    /// Returns `false` and changes nothing in Auto mode, where the point is
    /// derived from the image.
    pub fn set_black(&mut self, v: f32) -> bool {
        if self.mode == Mode::Auto {
            debug!(v, "set_black ignored in auto mode");
            return false;
        }
        self.point = self.point.with_black(v);
        true
    }

    /// Moves the white point (Manual mode only), stopping at the black point.
    ///
    /// Returns `false` and changes nothing in Auto mode.
    pub fn set_white(&mut self, v: f32) -> bool {
        if self.mode == Mode::Auto {
            debug!(v, "set_white ignored in auto mode");
            return false;
        }
        self.point = self.point.with_white(v);
        true
    }

    /// [`set_black`](Self::set_black) in slider units.
    pub fn set_black_slider(&mut self, v: f32) -> bool {
        self.set_black(v / self.slider_scale)
    }

    /// [`set_white`](Self::set_white) in slider units.
    pub fn set_white_slider(&mut self, v: f32) -> bool {
        self.set_white(v / self.slider_scale)
    }

    /// Snapshot of mode and point.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            mode: self.mode,
            point: self.point,
        }
    }

    /// Restores a snapshot taken with [`state`](Self::state).
    pub fn restore(&mut self, state: ControllerState) {
        self.mode = state.mode;
        self.point = state.point;
    }

    /// Inverts `original`, picks the point (scanning in Auto mode) and stretches.
    ///
    /// In Auto mode the computed point is stored, so sliders reflect it.
    /// On failure the point is left untouched.
    ///
    /// # Errors
    ///
    /// `InvalidImage` if `original` has no pixel data.
    pub fn process<T: PixelFormat>(&mut self, original: &Image<T>) -> Result<Image<T>> {
        trace!(width = original.width(), height = original.height(), mode = %self.mode, "process");
        let inverted = self.invert.apply(original)?;

        let point = match self.mode {
            Mode::Auto => {
                let ext = extrema::scan_with(&inverted, self.invert.backend())?;
                // scan clamps into [0, 1] with min <= max
                ColorPoint::new(ext.min, ext.max).unwrap_or(self.point)
            }
            Mode::Manual => self.point,
        };

        let result = self
            .levels
            .with_points(point.black(), point.white())
            .apply(&inverted)?;

        debug!(black = point.black(), white = point.white(), "processed");
        self.point = point;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use inverter_core::ErrorKind;

    const EPSILON: f32 = 1e-5;

    fn manual(black: f32, white: f32) -> ContrastController {
        let config = PipelineConfig::builder()
            .mode(Mode::Manual)
            .points(black, white)
            .build()
            .unwrap();
        ContrastController::new(&config).unwrap()
    }

    fn gray_pair(a: f32, b: f32) -> Image<f32> {
        let mut img = Image::filled(2, 1, [a, a, a, 1.0]);
        img.set_pixel(1, 0, [b, b, b, 0.5]);
        img
    }

    #[test]
    fn test_manual_black_stops_at_white() {
        let mut ctl = manual(0.0, 1.0);
        assert!(ctl.set_white_slider(60.0));
        assert!(ctl.set_black_slider(20.0));
        assert!(ctl.set_black_slider(70.0));
        let p = ctl.point();
        assert_eq!(p.black(), p.white());
        assert_abs_diff_eq!(p.white(), 0.6, epsilon = EPSILON);
        assert_abs_diff_eq!(ctl.slider_values().0, 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_manual_white_stops_at_black() {
        let mut ctl = manual(0.4, 0.9);
        ctl.set_white(0.1);
        assert_eq!(ctl.point().as_tuple(), (0.4, 0.4));
    }

    #[test]
    fn test_setters_ignored_in_auto() {
        let mut ctl = ContrastController::new(&PipelineConfig::default()).unwrap();
        assert!(!ctl.set_black(0.3));
        assert!(!ctl.set_white(0.5));
        assert_eq!(ctl.point(), ColorPoint::FULL);
    }

    #[test]
    fn test_set_mode_has_no_side_effect() {
        let mut ctl = manual(0.1, 0.9);
        ctl.set_mode(Mode::Auto);
        assert_eq!(ctl.mode(), Mode::Auto);
        assert_eq!(ctl.point().as_tuple(), (0.1, 0.9));
        ctl.set_mode(Mode::Manual);
        assert!(ctl.set_black(0.2));
    }

    #[test]
    fn test_auto_sets_point_from_inverted_extremes() {
        let mut ctl = ContrastController::new(&PipelineConfig::default()).unwrap();
        let img = gray_pair(0.1, 0.7);
        let out = ctl.process(&img).unwrap();
        // inverted luminances are 0.9 and 0.3
        assert_abs_diff_eq!(ctl.point().black(), 0.3, epsilon = EPSILON);
        assert_abs_diff_eq!(ctl.point().white(), 0.9, epsilon = EPSILON);
        assert_abs_diff_eq!(out.pixel(0, 0)[0], 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(out.pixel(1, 0)[0], 0.0, epsilon = EPSILON);
        assert_eq!(out.pixel(1, 0)[3], 0.5);
    }

    #[test]
    fn test_auto_uniform_image_passthrough() {
        let mut ctl = ContrastController::new(&PipelineConfig::default()).unwrap();
        let img: Image<u8> = Image::filled(3, 3, [100, 100, 100, 255]);
        let out = ctl.process(&img).unwrap();
        assert!(out.pixels().all(|px| px == [155, 155, 155, 255]));
        assert_eq!(ctl.point().black(), ctl.point().white());
    }

    #[test]
    fn test_manual_uses_held_point() {
        let mut ctl = manual(0.25, 0.75);
        let img = gray_pair(0.5, 0.25);
        let out = ctl.process(&img).unwrap();
        // inverted: 0.5 -> 0.5, 0.75 -> 1.0
        assert_abs_diff_eq!(out.pixel(0, 0)[1], 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(out.pixel(1, 0)[1], 1.0, epsilon = EPSILON);
        assert_eq!(ctl.point().as_tuple(), (0.25, 0.75));
    }

    #[test]
    fn test_failure_leaves_point_unchanged() {
        let mut ctl = ContrastController::new(&PipelineConfig::default()).unwrap();
        ctl.process(&gray_pair(0.1, 0.7)).unwrap();
        let before = ctl.point();
        let err = ctl.process(&Image::<f32>::new(0, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidImage);
        assert_eq!(ctl.point(), before);
    }

    #[test]
    fn test_state_restore() {
        let mut ctl = manual(0.1, 0.9);
        let saved = ctl.state();
        ctl.set_black(0.5);
        ctl.set_mode(Mode::Auto);
        ctl.restore(saved);
        assert_eq!(ctl.state(), saved);
    }
}
