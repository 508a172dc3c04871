//! Ruler Terrain - Elevation sampling from tiled elevation rasters
//!
//! Defines the asynchronous elevation port consumed by the controller and
//! provides a Terrain-RGB implementation: slippy tile addressing, PNG tile
//! fetch, and the RGB-to-meters decode.

pub mod ports;
pub mod terrain_rgb;
pub mod tile;

pub use ports::ElevationSampler;
pub use terrain_rgb::TerrainRgb;
