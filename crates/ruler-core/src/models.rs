//! Canonical measurement types shared across the ruler crates.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulerError};

/// Geographic position in WGS 84, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    /// Create a position, rejecting non-finite ordinates.
    pub fn new(lng: f64, lat: f64) -> Result<Self> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(RulerError::NonFinitePosition { lng, lat });
        }
        Ok(Self { lng, lat })
    }

    /// GeoJSON position, longitude first.
    pub fn to_vec(self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }
}

impl From<LngLat> for geo::Point {
    fn from(p: LngLat) -> Self {
        geo::Point::new(p.lng, p.lat)
    }
}

/// One measured point: a clicked position paired with its sampled elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub position: LngLat,
    /// Elevation in meters.
    pub elevation: f64,
}

impl Sample {
    pub fn new(position: LngLat, elevation: f64) -> Result<Self> {
        if !elevation.is_finite() {
            return Err(RulerError::NonFiniteElevation { value: elevation });
        }
        Ok(Self { position, elevation })
    }
}

/// Distance units for cumulative path distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Meters,
    #[default]
    Kilometers,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance value in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Meters => value,
            DistanceUnit::Kilometers => value * 1000.0,
            DistanceUnit::Miles => value * 1609.34,
            DistanceUnit::Feet => value * 0.3048,
        }
    }

    /// Convert a distance value from meters to this unit
    pub fn from_meters(&self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Kilometers => meters / 1000.0,
            DistanceUnit::Miles => meters / 1609.34,
            DistanceUnit::Feet => meters / 0.3048,
        }
    }
}
