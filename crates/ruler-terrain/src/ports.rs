//! Elevation port definition

use async_trait::async_trait;
use ruler_core::{LngLat, Result};

/// Port for sampling terrain elevation at a geographic position.
///
/// The controller issues one lookup per map click; this is the only
/// asynchronous boundary in the system.
#[async_trait]
pub trait ElevationSampler: Send + Sync {
    /// Sample the elevation in meters at `position`, reading the raster
    /// at the given zoom level.
    async fn elevation(&self, position: LngLat, zoom: u8) -> Result<f64>;
}
