//! Terrain-RGB tile sampler.
//!
//! Elevation rasters encoded in the Mapbox Terrain-RGB scheme pack height
//! into the three color channels of a PNG tile:
//! `elevation = -10000 + (r * 256 * 256 + g * 256 + b) * 0.1` meters.

use async_trait::async_trait;
use image::GenericImageView;
use tracing::debug;

use ruler_core::{LngLat, Result, RulerError};

use crate::ports::ElevationSampler;
use crate::tile;

/// Elevation sampler backed by a Terrain-RGB tileset.
pub struct TerrainRgb {
    /// Tile URL template with `{z}`, `{x}`, `{y}` placeholders
    url_template: String,
    tile_size: u32,
    client: reqwest::Client,
}

impl TerrainRgb {
    /// Create a sampler for the given tileset.
    pub fn new(url_template: impl Into<String>, tile_size: u32) -> Self {
        Self {
            url_template: url_template.into(),
            tile_size,
            client: reqwest::Client::new(),
        }
    }

    fn tile_url(&self, x: u32, y: u32, z: u8) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }

    /// Decode one Terrain-RGB pixel to meters.
    fn decode(r: u8, g: u8, b: u8) -> f64 {
        -10000.0 + (r as f64 * 65536.0 + g as f64 * 256.0 + b as f64) * 0.1
    }
}

#[async_trait]
impl ElevationSampler for TerrainRgb {
    async fn elevation(&self, position: LngLat, zoom: u8) -> Result<f64> {
        let addr = tile::locate(position, zoom, self.tile_size)?;
        let url = self.tile_url(addr.x, addr.y, addr.z);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RulerError::TileFetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(RulerError::TileFetch {
                url,
                reason: format!("HTTP status {}", response.status()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| RulerError::TileFetch {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let tile = image::load_from_memory(&bytes).map_err(|e| RulerError::TileDecode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        if addr.px >= tile.width() || addr.py >= tile.height() {
            return Err(RulerError::TileDecode {
                url,
                reason: format!(
                    "pixel ({}, {}) outside {}x{} tile",
                    addr.px,
                    addr.py,
                    tile.width(),
                    tile.height()
                ),
            });
        }

        let [r, g, b, _] = tile.get_pixel(addr.px, addr.py).0;
        let elevation = Self::decode(r, g, b);
        debug!(
            lng = position.lng,
            lat = position.lat,
            zoom,
            tile_x = addr.x,
            tile_y = addr.y,
            elevation,
            "sampled terrain-rgb elevation"
        );
        Ok(elevation)
    }
}
