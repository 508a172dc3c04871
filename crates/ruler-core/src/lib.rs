//! Ruler Core - Measurement session, labels, and GeoJSON derivation
//!
//! This crate contains the pure measurement logic for the terrain ruler:
//! the ordered sample list, cumulative distance accumulation, label
//! formatting, and the GeoJSON payloads that drive the map overlay.
//! It has no knowledge of any host map or rendering surface.

pub mod error;
pub mod label;
pub mod models;
pub mod options;
pub mod session;

pub use error::{Result, RulerError};
pub use label::LabelFormat;
pub use models::{DistanceUnit, LngLat, Sample};
pub use options::ControlOptions;
pub use session::{MeasurementSession, PointProperties};
