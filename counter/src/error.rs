//! Error types for the vehicle counter application

use blobtrack::TrackError;
use thiserror::Error;

/// Result type alias for the counter application
pub type Result<T> = std::result::Result<T, CounterError>;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Detection record {line}: {message}")]
    Recording { line: usize, message: String },

    #[error("Engine error: {0}")]
    Engine(#[from] TrackError),
}

impl CounterError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    pub fn recording<S: Into<String>>(line: usize, msg: S) -> Self {
        Self::Recording {
            line,
            message: msg.into(),
        }
    }
}
