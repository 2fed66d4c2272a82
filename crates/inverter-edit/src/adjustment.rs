//! Adjustment metadata attached to a committed edit.
//!
//! The payload is a tagged marker only. It carries no black/white point, so
//! a later session cannot reconstruct the edit and always starts again from
//! the full-resolution source.

use serde::{Deserialize, Serialize};

/// Identifier written into every committed edit.
pub const FORMAT_IDENTIFIER: &str = "se.lenborje.inverter";

/// Version of the payload layout.
pub const FORMAT_VERSION: &str = "1.0";

/// Opaque, versioned record stored next to an edited asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentData {
    /// Reverse-DNS identifier of the editor that wrote the record.
    pub format_identifier: String,
    /// Payload layout version.
    pub format_version: String,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    inversion: bool,
}

impl AdjustmentData {
    /// Creates a record with arbitrary contents.
    pub fn new(
        format_identifier: impl Into<String>,
        format_version: impl Into<String>,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            format_identifier: format_identifier.into(),
            format_version: format_version.into(),
            payload,
        }
    }

    /// The record written on a successful commit: `{"inversion":true}`.
    pub fn inversion_marker() -> Self {
        let payload = serde_json::json!({ "inversion": true }).to_string().into_bytes();
        Self::new(FORMAT_IDENTIFIER, FORMAT_VERSION, payload)
    }

    /// Returns `true` if the identifier and version match this editor's.
    pub fn is_own_format(&self) -> bool {
        self.format_identifier == FORMAT_IDENTIFIER && self.format_version == FORMAT_VERSION
    }

    /// Returns `true` if the payload parses as an inversion marker set to `true`.
    pub fn is_inversion_marker(&self) -> bool {
        serde_json::from_slice::<Marker>(&self.payload)
            .map(|m| m.inversion)
            .unwrap_or(false)
    }

    /// Payload as UTF-8 text, if it is valid UTF-8.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}
