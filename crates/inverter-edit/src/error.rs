//! Error types for editing sessions.

use inverter_core::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for controller configuration and editing sessions.
#[derive(Error, Debug)]
pub enum EditError {
    /// `preview` or `finish` was called before an input image was supplied.
    #[error("no input image: start the session first")]
    NoInput,

    /// A pipeline operation failed.
    #[error(transparent)]
    Core(#[from] inverter_core::Error),

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

impl EditError {
    /// Failure kind, delegating to the wrapped pipeline error.
    ///
    /// A missing input counts as [`ErrorKind::InvalidImage`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoInput => ErrorKind::InvalidImage,
            Self::Core(e) => e.kind(),
            Self::Config(_) | Self::Io { .. } => ErrorKind::Other,
        }
    }
}
