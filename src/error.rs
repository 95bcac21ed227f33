//! Error types for the dye simulation engine.
//!
//! Every variant is a local, recoverable condition. Callers are expected to
//! fall back (e.g. to [`DyeColor::NEUTRAL_GRAY`](crate::color::DyeColor::NEUTRAL_GRAY)
//! or by skipping a technique) rather than abort.

use thiserror::Error;

/// Errors reported by the engine's public entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DyeError {
    /// Hex color string with the wrong length or a non-hex digit.
    #[error("invalid color format: {0:?} (expected #RGB or #RRGGBB)")]
    InvalidColorFormat(String),

    /// Zero-sized image/canvas, or a buffer that is not `width * height` RGBA pixels.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Technique identifier outside the closed enumeration.
    #[error("unknown technique: {0:?}")]
    UnknownTechnique(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DyeError>;

#[cfg(feature = "python")]
impl From<DyeError> for pyo3::PyErr {
    fn from(err: DyeError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
