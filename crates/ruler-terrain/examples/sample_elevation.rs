//! Example sampling Terrain-RGB elevation at a position
//!
//! Fetches one tile from a public Terrain-RGB tileset and decodes the
//! elevation under the given coordinate.
//!
//! Note: this example needs network access to the tileset.
//! To run: cargo run --example sample_elevation -- <lng> <lat> [zoom]

use anyhow::{Context, Result};
use ruler_core::LngLat;
use ruler_terrain::{ElevationSampler, TerrainRgb};

const TILESET: &str = "https://wasac.github.io/rw-terrain/tiles/{z}/{x}/{y}.png";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let lng: f64 = args
        .next()
        .unwrap_or_else(|| "29.898".to_string())
        .parse()
        .context("longitude must be a number")?;
    let lat: f64 = args
        .next()
        .unwrap_or_else(|| "-2.054".to_string())
        .parse()
        .context("latitude must be a number")?;
    let zoom: u8 = args
        .next()
        .unwrap_or_else(|| "9".to_string())
        .parse()
        .context("zoom must be an integer")?;

    let position = LngLat::new(lng, lat)?;
    let sampler = TerrainRgb::new(TILESET, 512);

    println!("Sampling {TILESET}");
    println!("  position: ({lng}, {lat}), zoom {zoom}\n");

    match sampler.elevation(position, zoom).await {
        Ok(elevation) => println!("Elevation: {elevation:.1} m"),
        Err(e) => {
            println!("Lookup failed: {e}");
            println!("(The default tileset only covers Rwanda.)");
        }
    }

    Ok(())
}
