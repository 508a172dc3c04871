//! Slippy tile addressing for Web Mercator rasters.

use ruler_core::{LngLat, Result, RulerError};

/// Latitude bound of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// A position resolved to a tile and a pixel within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAddress {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    /// Pixel column within the tile, `0..tile_size`
    pub px: u32,
    /// Pixel row within the tile, `0..tile_size`
    pub py: u32,
}

/// Resolve a geographic position to the tile containing it and the pixel
/// inside that tile, for tiles of `tile_size` pixels at zoom `z`.
pub fn locate(position: LngLat, z: u8, tile_size: u32) -> Result<TileAddress> {
    if position.lat.abs() > MAX_LATITUDE {
        return Err(RulerError::OutsideCoverage {
            lng: position.lng,
            lat: position.lat,
            zoom: z,
        });
    }

    let n = 2f64.powi(z as i32);
    let x_exact = (position.lng + 180.0) / 360.0 * n;
    let lat_rad = position.lat.to_radians();
    let y_exact = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * n;

    // lng 180 and the mercator poles land exactly on the far edge; keep
    // them in the last tile rather than off the grid
    let max_index = n - 1.0;
    let x_tile = x_exact.floor().clamp(0.0, max_index);
    let y_tile = y_exact.floor().clamp(0.0, max_index);

    let size = tile_size as f64;
    let px = (((x_exact - x_tile) * size) as u32).min(tile_size - 1);
    let py = (((y_exact - y_tile) * size) as u32).min(tile_size - 1);

    Ok(TileAddress {
        x: x_tile as u32,
        y: y_tile as u32,
        z,
        px,
        py,
    })
}
