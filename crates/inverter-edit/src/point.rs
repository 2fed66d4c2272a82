//! Contrast mode and black/white point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the black/white point is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Recomputed from the inverted image's luminance extremes on every run.
    #[default]
    Auto,
    /// Set by the user through the controller.
    Manual,
}

impl Mode {
    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown mode '{other}' (expected auto or manual)")),
        }
    }
}

/// Black and white point, both in `[0, 1]`, with `black <= white`.
///
/// The fields are private so the ordering holds for every value that
/// exists. Moving one end past the other stops it at the other's position.
///
/// # Example
///
/// ```rust
/// use inverter_edit::ColorPoint;
///
/// let p = ColorPoint::new(0.2, 0.6).unwrap();
/// let moved = p.with_black(0.7);
/// assert_eq!((moved.black(), moved.white()), (0.6, 0.6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint", into = "RawPoint")]
pub struct ColorPoint {
    black: f32,
    white: f32,
}

impl Default for ColorPoint {
    fn default() -> Self {
        Self::FULL
    }
}

impl ColorPoint {
    /// The full range `(0, 1)`, which leaves levels unchanged.
    pub const FULL: Self = Self { black: 0.0, white: 1.0 };

    /// Creates a point, clamping both values into `[0, 1]`.
    ///
    /// Returns `None` if either value is NaN or `black > white`.
    pub fn new(black: f32, white: f32) -> Option<Self> {
        if black.is_nan() || white.is_nan() {
            return None;
        }
        let (black, white) = (black.clamp(0.0, 1.0), white.clamp(0.0, 1.0));
        (black <= white).then_some(Self { black, white })
    }

    /// Creates a point from slider positions on a `0..=scale` scale.
    pub fn from_slider(black: f32, white: f32, scale: f32) -> Option<Self> {
        Self::new(black / scale, white / scale)
    }

    /// Black point.
    #[inline]
    pub fn black(&self) -> f32 {
        self.black
    }

    /// White point.
    #[inline]
    pub fn white(&self) -> f32 {
        self.white
    }

    /// Both values as `(black, white)`.
    #[inline]
    pub fn as_tuple(&self) -> (f32, f32) {
        (self.black, self.white)
    }

    /// Slider positions on a `0..=scale` scale.
    pub fn to_slider(&self, scale: f32) -> (f32, f32) {
        (self.black * scale, self.white * scale)
    }

    /// Moves the black point, stopping at the white point.
    ///
    /// NaN leaves the point unchanged.
    pub fn with_black(self, v: f32) -> Self {
        if v.is_nan() {
            return self;
        }
        Self {
            black: v.clamp(0.0, 1.0).min(self.white),
            white: self.white,
        }
    }

    /// Moves the white point, stopping at the black point.
    ///
    /// NaN leaves the point unchanged.
    pub fn with_white(self, v: f32) -> Self {
        if v.is_nan() {
            return self;
        }
        Self {
            black: self.black,
            white: v.clamp(0.0, 1.0).max(self.black),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPoint {
    black: f32,
    white: f32,
}

impl TryFrom<RawPoint> for ColorPoint {
    type Error = String;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        ColorPoint::new(raw.black, raw.white)
            .ok_or_else(|| format!("black {} must not exceed white {}", raw.black, raw.white))
    }
}

impl From<ColorPoint> for RawPoint {
    fn from(p: ColorPoint) -> Self {
        Self {
            black: p.black,
            white: p.white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted() {
        assert!(ColorPoint::new(0.7, 0.3).is_none());
        assert!(ColorPoint::new(f32::NAN, 0.3).is_none());
        assert_eq!(ColorPoint::new(0.4, 0.4).unwrap().as_tuple(), (0.4, 0.4));
    }

    #[test]
    fn test_new_clamps_to_unit() {
        let p = ColorPoint::new(-0.5, 3.0).unwrap();
        assert_eq!(p, ColorPoint::FULL);
    }

    #[test]
    fn test_black_stops_at_white() {
        let p = ColorPoint::from_slider(20.0, 60.0, 100.0).unwrap();
        let moved = p.with_black(0.7);
        assert_eq!(moved.black(), moved.white());
        assert_eq!(moved.white(), p.white());
    }

    #[test]
    fn test_white_stops_at_black() {
        let p = ColorPoint::new(0.5, 0.9).unwrap().with_white(0.1);
        assert_eq!(p.as_tuple(), (0.5, 0.5));
    }

    #[test]
    fn test_nan_update_ignored() {
        let p = ColorPoint::new(0.1, 0.9).unwrap();
        assert_eq!(p.with_black(f32::NAN), p);
        assert_eq!(p.with_white(f32::NAN), p);
    }

    #[test]
    fn test_slider_roundtrip() {
        let p = ColorPoint::new(0.25, 0.75).unwrap();
        assert_eq!(p.to_slider(100.0), (25.0, 75.0));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("AUTO".parse::<Mode>().unwrap(), Mode::Auto);
        assert_eq!("manual".parse::<Mode>().unwrap(), Mode::Manual);
        assert!("levels".parse::<Mode>().is_err());
        assert_eq!(Mode::Manual.to_string(), "manual");
    }

    #[test]
    fn test_point_deserialize_validates() {
        let ok: ColorPoint = serde_json::from_str(r#"{"black":0.1,"white":0.9}"#).unwrap();
        assert_eq!(ok.as_tuple(), (0.1, 0.9));
        assert!(serde_json::from_str::<ColorPoint>(r#"{"black":0.9,"white":0.1}"#).is_err());
    }
}
