//! Error types for the tracking engine

use thiserror::Error;

/// Result type alias for the tracking engine
pub type Result<T> = std::result::Result<T, TrackError>;

/// Errors that can occur while tracking and counting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("Invalid box geometry: ({x}, {y}) with extent {w}x{h}")]
    InvalidGeometry { x: i32, y: i32, w: i32, h: i32 },

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Track id {0} is already registered")]
    DuplicateIdentifier(u32),

    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Array shape error: {0}")]
    Shape(String),
}

impl TrackError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn detector<S: Into<String>>(msg: S) -> Self {
        Self::Detector(msg.into())
    }
}
