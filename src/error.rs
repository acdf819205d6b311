//! Error types
//!
//! Gameplay operations are total; only misconfiguration surfaces as an error.

use thiserror::Error;

/// Fatal misconfiguration when building a rescue container
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RescueError {
    /// Width or height is zero, negative, or not finite.
    ///
    /// Zero is rejected along with negatives: a zero-sized container has
    /// coincident walls and bounds that can never hold a grain.
    #[error("rescue container extent must be positive and finite (got {width}x{height})")]
    InvalidExtent { width: f32, height: f32 },

    #[error("rescue container position must be finite (got {x}, {y})")]
    InvalidPosition { x: f32, y: f32 },
}

/// Failure loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
