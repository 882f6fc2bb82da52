//! Error types for the particle morph library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Replay data could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Landmark set failed validation (wrong count, out-of-range coordinates)
    #[error("Landmark error: {0}")]
    Landmark(String),

    /// Landmark source could not start or deliver a frame
    #[error("Detector error: {0}")]
    Detector(String),

    /// Render adapter failed to allocate or draw
    #[error("Render error: {0}")]
    Render(String),

    /// Filter initialization or processing error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),

    /// The other end of a control channel went away
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
