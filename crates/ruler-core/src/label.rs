//! Label formatting conventions for measured points.
//!
//! Two conventions exist: a path label combining cumulative distance with
//! elevation, and an elevation-only label. Exactly one is active per
//! control; both can be overridden with a custom formatter.

use std::fmt;

/// Formatter for the path convention: `(cumulative distance, elevation) -> label`.
/// Distance is in the configured unit, elevation in meters.
pub type PathFormatter = Box<dyn Fn(f64, f64) -> String + Send + Sync>;

/// Formatter for the elevation-only convention: `(elevation) -> label`.
pub type ElevationFormatter = Box<dyn Fn(f64) -> String + Send + Sync>;

/// The active label convention for a control.
pub enum LabelFormat {
    /// Cumulative distance plus optional altitude line.
    Path(PathFormatter),
    /// Altitude only, distance ignored.
    ElevationOnly(ElevationFormatter),
}

impl LabelFormat {
    /// Path convention with the stock format.
    pub fn default_path() -> Self {
        LabelFormat::Path(Box::new(default_path_label))
    }

    /// Elevation-only convention with the stock format.
    pub fn default_elevation_only() -> Self {
        LabelFormat::ElevationOnly(Box::new(default_elevation_label))
    }

    /// Path convention with a custom formatter.
    pub fn path<F>(f: F) -> Self
    where
        F: Fn(f64, f64) -> String + Send + Sync + 'static,
    {
        LabelFormat::Path(Box::new(f))
    }

    /// Elevation-only convention with a custom formatter.
    pub fn elevation_only<F>(f: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        LabelFormat::ElevationOnly(Box::new(f))
    }

    /// Render the label for one sample.
    pub fn render(&self, cumulative_distance: f64, elevation: f64) -> String {
        match self {
            LabelFormat::Path(f) => f(cumulative_distance, elevation),
            LabelFormat::ElevationOnly(f) => f(elevation),
        }
    }
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self::default_path()
    }
}

impl fmt::Debug for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFormat::Path(_) => f.write_str("LabelFormat::Path(..)"),
            LabelFormat::ElevationOnly(_) => f.write_str("LabelFormat::ElevationOnly(..)"),
        }
    }
}

/// Stock path label: `"1.23 km"` at or above one kilometer, `"850 m"` below;
/// a second line `"alt.{elevation}m"` is appended only for positive elevation.
pub fn default_path_label(length: f64, elevation: f64) -> String {
    let length_label = if length < 1.0 {
        format!("{} m", (length * 1000.0).round() as i64)
    } else {
        format!("{:.2} km", length)
    };
    if elevation > 0.0 {
        format!("{}\nalt.{}m", length_label, elevation.round() as i64)
    } else {
        length_label
    }
}

/// Stock elevation-only label: always `"alt.{elevation}m"`, regardless of sign.
pub fn default_elevation_label(elevation: f64) -> String {
    format!("alt.{}m", elevation.round() as i64)
}
