//! Control configuration, merged over documented defaults.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, RulerError};
use crate::label::LabelFormat;
use crate::models::DistanceUnit;

/// Per-control configuration, fixed at construction.
#[derive(Debug)]
pub struct ControlOptions {
    /// Terrain tile edge length in pixels
    pub tile_size: u32,
    /// Font family list for point labels
    pub font: Vec<String>,
    /// Label font size
    pub font_size: f64,
    /// Label halo width
    pub font_halo: f64,
    /// Color of the measured line, label text, and marker border
    pub main_color: String,
    /// Color of the label halo and marker fill
    pub halo_color: String,
    /// Unit for cumulative path distance
    pub units: DistanceUnit,
    /// Clamp negative sampled elevation to zero before it enters the session
    pub clamp_negative_elevation: bool,
    /// Emit point geometry with elevation as a third ordinate
    pub elevation_in_geometry: bool,
    /// Active label convention
    pub label: LabelFormat,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            tile_size: 512,
            font: vec!["sans".to_string()],
            font_size: 12.0,
            font_halo: 1.0,
            main_color: "#263238".to_string(),
            halo_color: "#fff".to_string(),
            units: DistanceUnit::Kilometers,
            clamp_negative_elevation: false,
            elevation_in_geometry: false,
            label: LabelFormat::default(),
        }
    }
}

impl ControlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label font family list
    pub fn font(mut self, font: Vec<String>) -> Self {
        self.font = font;
        self
    }

    /// Set the label font size
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the label halo width
    pub fn font_halo(mut self, halo: f64) -> Self {
        self.font_halo = halo;
        self
    }

    /// Set the main color (line, text, marker border)
    pub fn main_color(mut self, color: impl Into<String>) -> Self {
        self.main_color = color.into();
        self
    }

    /// Set the halo color (label halo, marker fill)
    pub fn halo_color(mut self, color: impl Into<String>) -> Self {
        self.halo_color = color.into();
        self
    }

    /// Set the terrain tile size in pixels
    pub fn tile_size(mut self, size: u32) -> Self {
        self.tile_size = size;
        self
    }

    /// Set the distance unit
    pub fn units(mut self, units: DistanceUnit) -> Self {
        self.units = units;
        self
    }

    /// Clamp negative sampled elevations to zero
    pub fn clamp_negative_elevation(mut self, clamp: bool) -> Self {
        self.clamp_negative_elevation = clamp;
        self
    }

    /// Emit 3D point geometry with elevation as the third ordinate
    pub fn elevation_in_geometry(mut self, enabled: bool) -> Self {
        self.elevation_in_geometry = enabled;
        self
    }

    /// Set the label convention
    pub fn label(mut self, label: LabelFormat) -> Self {
        self.label = label;
        self
    }

    /// Merge values from a TOML config file over the current options.
    /// Absent keys keep their current value.
    pub fn load_from_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading control options");
        self.merge_toml_str(&content)
    }

    /// Merge values from a TOML string over the current options.
    pub fn merge_toml_str(mut self, content: &str) -> Result<Self> {
        let file: FileOptions = toml::from_str(content).map_err(|e| RulerError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        if let Some(tile_size) = file.tile_size {
            if tile_size == 0 {
                return Err(RulerError::ConfigInvalid {
                    key: "tile_size".to_string(),
                    reason: "must be positive".to_string(),
                });
            }
            self.tile_size = tile_size;
        }
        if let Some(font) = file.font {
            self.font = font;
        }
        if let Some(font_size) = file.font_size {
            self.font_size = font_size;
        }
        if let Some(font_halo) = file.font_halo {
            self.font_halo = font_halo;
        }
        if let Some(main_color) = file.main_color {
            self.main_color = main_color;
        }
        if let Some(halo_color) = file.halo_color {
            self.halo_color = halo_color;
        }
        if let Some(units) = file.units {
            self.units = units;
        }
        if let Some(clamp) = file.clamp_negative_elevation {
            self.clamp_negative_elevation = clamp;
        }
        if let Some(enabled) = file.elevation_in_geometry {
            self.elevation_in_geometry = enabled;
        }

        Ok(self)
    }
}

/// TOML file representation; every key optional
#[derive(Debug, Deserialize)]
struct FileOptions {
    tile_size: Option<u32>,
    font: Option<Vec<String>>,
    font_size: Option<f64>,
    font_halo: Option<f64>,
    main_color: Option<String>,
    halo_color: Option<String>,
    units: Option<DistanceUnit>,
    clamp_negative_elevation: Option<bool>,
    elevation_in_geometry: Option<bool>,
}
