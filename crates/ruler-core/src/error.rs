//! Error types for the terrain ruler

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulerError {
    // Session errors
    #[error("Sample index {index} out of range for session of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Position ({lng}, {lat}) has non-finite ordinates")]
    NonFinitePosition { lng: f64, lat: f64 },

    #[error("Elevation value {value} is not finite")]
    NonFiniteElevation { value: f64 },

    // Elevation sampling errors
    #[error("Failed to fetch tile {url}: {reason}")]
    TileFetch { url: String, reason: String },

    #[error("Failed to decode tile {url}: {reason}")]
    TileDecode { url: String, reason: String },

    #[error("Position ({lng}, {lat}) is outside tile coverage at zoom {zoom}")]
    OutsideCoverage { lng: f64, lat: f64, zoom: u8 },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RulerError>;
