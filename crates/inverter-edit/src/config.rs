//! Pipeline configuration.
//!
//! Use [`PipelineConfig::builder`] for programmatic setup or
//! [`PipelineConfig::from_yaml_str`] / [`PipelineConfig::load`] for files:
//!
//! ```yaml
//! mode: manual
//! black: 0.1
//! white: 0.9
//! slider_scale: 100
//! output_range: clamp
//! backend: auto
//! ```
//!
//! Missing keys take their defaults. Values are validated on load and on
//! [`PipelineConfigBuilder::build`].

use crate::error::{EditError, EditResult};
use crate::point::{ColorPoint, Mode};
use inverter_ops::{Backend, OutputRange};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default slider scale (sliders run 0..=100).
pub const DEFAULT_SLIDER_SCALE: f32 = 100.0;

/// Settings for a [`ContrastController`](crate::ContrastController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Starting mode.
    pub mode: Mode,
    /// Starting black point in `[0, 1]`.
    pub black: f32,
    /// Starting white point in `[0, 1]`.
    pub white: f32,
    /// Full-scale value of the UI sliders.
    pub slider_scale: f32,
    /// Handling of stretched values outside `[0, 1]`.
    pub output_range: OutputRange,
    /// Execution backend.
    pub backend: Backend,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Auto,
            black: 0.0,
            white: 1.0,
            slider_scale: DEFAULT_SLIDER_SCALE,
            output_range: OutputRange::Clamp,
            backend: Backend::Auto,
        }
    }
}

impl PipelineConfig {
    /// Starts a builder from the defaults.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Checks ranges and returns the starting point.
    ///
    /// # Errors
    ///
    /// [`EditError::Config`] if a point is outside `[0, 1]`, `black > white`,
    /// or the slider scale is not a positive finite number.
    pub fn validate(&self) -> EditResult<ColorPoint> {
        if !(self.slider_scale.is_finite() && self.slider_scale > 0.0) {
            return Err(EditError::Config(format!(
                "slider_scale must be positive, got {}",
                self.slider_scale
            )));
        }
        for (name, v) in [("black", self.black), ("white", self.white)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(EditError::Config(format!("{name} must be in [0, 1], got {v}")));
            }
        }
        ColorPoint::new(self.black, self.white).ok_or_else(|| {
            EditError::Config(format!(
                "black {} must not exceed white {}",
                self.black, self.white
            ))
        })
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> EditResult<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| EditError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML file.
    pub fn load(path: impl AsRef<Path>) -> EditResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EditError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Replaces the starting point with slider positions given on the
    /// command line. Either end may be omitted to keep the current value.
    ///
    /// The resulting pair is validated as a whole, so an explicit pair is
    /// never clamped against the value it replaces.
    ///
    /// # Errors
    ///
    /// [`EditError::Config`] if the resulting point is out of range or
    /// `black > white`.
    pub fn with_slider_points(mut self, black: Option<f32>, white: Option<f32>) -> EditResult<Self> {
        if let Some(black) = black {
            self.black = black / self.slider_scale;
        }
        if let Some(white) = white {
            self.white = white / self.slider_scale;
        }
        self.validate()?;
        Ok(self)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> EditResult<String> {
        serde_yaml::to_string(self).map_err(|e| EditError::Config(e.to_string()))
    }
}

/// Builder for [`PipelineConfig`].
///
/// ```rust
/// use inverter_edit::{Mode, PipelineConfig};
///
/// let config = PipelineConfig::builder()
///     .mode(Mode::Manual)
///     .slider_points(10.0, 90.0)
///     .build()
///     .unwrap();
/// assert!((config.black - 0.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
    slider_points: Option<(f32, f32)>,
}

impl PipelineConfigBuilder {
    /// Starting mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Starting black/white point in `[0, 1]`.
    pub fn points(mut self, black: f32, white: f32) -> Self {
        self.config.black = black;
        self.config.white = white;
        self.slider_points = None;
        self
    }

    /// Starting black/white point in slider units, converted at build time.
    pub fn slider_points(mut self, black: f32, white: f32) -> Self {
        self.slider_points = Some((black, white));
        self
    }

    /// Full-scale value of the sliders.
    pub fn slider_scale(mut self, scale: f32) -> Self {
        self.config.slider_scale = scale;
        self
    }

    /// Output range handling.
    pub fn output_range(mut self, range: OutputRange) -> Self {
        self.config.output_range = range;
        self
    }

    /// Execution backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> EditResult<PipelineConfig> {
        let mut config = self.config;
        if let Some((black, white)) = self.slider_points {
            config.black = black / config.slider_scale;
            config.white = white / config.slider_scale;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.validate().unwrap(), ColorPoint::FULL);
        assert_eq!(config.mode, Mode::Auto);
        assert_eq!(config.output_range, OutputRange::Clamp);
    }

    #[test]
    fn test_yaml_partial() {
        let config = PipelineConfig::from_yaml_str("mode: manual\nblack: 0.2\nwhite: 0.8\n").unwrap();
        assert_eq!(config.mode, Mode::Manual);
        assert_eq!(config.black, 0.2);
        assert_eq!(config.slider_scale, DEFAULT_SLIDER_SCALE);
        assert_eq!(config.backend, Backend::Auto);
    }

    #[test]
    fn test_yaml_enums() {
        let config =
            PipelineConfig::from_yaml_str("output_range: unclamped\nbackend: serial\n").unwrap();
        assert_eq!(config.output_range, OutputRange::Unclamped);
        assert_eq!(config.backend, Backend::Serial);
    }

    #[test]
    fn test_yaml_rejects_unknown_key() {
        let err = PipelineConfig::from_yaml_str("gamma: 2.2\n").unwrap_err();
        assert!(matches!(err, EditError::Config(_)));
    }

    #[test]
    fn test_rejects_inverted_points() {
        let err = PipelineConfig::builder().points(0.9, 0.1).build().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(PipelineConfig::builder().points(0.0, 1.5).build().is_err());
        assert!(PipelineConfig::builder().slider_scale(0.0).build().is_err());
    }

    #[test]
    fn test_slider_points_replace_file_pair() {
        let config = PipelineConfig::from_yaml_str("mode: manual\nblack: 0.5\nwhite: 0.6\n")
            .unwrap()
            .with_slider_points(Some(70.0), Some(90.0))
            .unwrap();
        assert_abs_diff_eq!(config.black, 0.7, epsilon = EPSILON);
        assert_abs_diff_eq!(config.white, 0.9, epsilon = EPSILON);
    }

    #[test]
    fn test_slider_points_keep_missing_end() {
        let base = PipelineConfig::from_yaml_str("black: 0.1\nwhite: 0.6\n").unwrap();
        let config = base.clone().with_slider_points(None, Some(80.0)).unwrap();
        assert_eq!(config.black, 0.1);
        assert_abs_diff_eq!(config.white, 0.8, epsilon = EPSILON);

        let err = base.with_slider_points(Some(70.0), None).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let config = PipelineConfig::builder()
            .mode(Mode::Manual)
            .points(0.25, 0.5)
            .backend(Backend::Serial)
            .build()
            .unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_yaml().unwrap().as_bytes()).unwrap();
        assert_eq!(PipelineConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PipelineConfig::load("/nonexistent/inverter.yaml").unwrap_err();
        assert!(matches!(err, EditError::Io { .. }));
    }
}
