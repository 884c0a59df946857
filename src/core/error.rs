//! Error types for terminus

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid coordinate: lat={lat}, lng={lng} (expected lat in [-90, 90], lng in [-180, 180])")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid direction vector: {0:?}")]
    InvalidDirection([f64; 3]),

    #[error("invalid grid step: {0} (must be finite and > 0)")]
    InvalidStep(f64),

    #[error("invalid timestamp: {0}")]
    Timestamp(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
