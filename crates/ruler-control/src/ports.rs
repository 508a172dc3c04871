//! Host map port definition
//!
//! The capability surface the controller needs from its host: named GeoJSON
//! sources, styled layers bound to them, draggable markers, cursor and zoom,
//! click routing, and named notifications. Implementations must treat
//! removal of an already-absent id as a no-op; the host may tear visual
//! state down out of band.

use geojson::GeoJson;
use ruler_core::LngLat;

use crate::overlay::{LayerSpec, MarkerStyle};

/// Handle to a marker placed on the host map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Pointer cursor shown over the map canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

/// Port for the host map surface. All methods run on the host UI thread.
pub trait HostMap {
    /// Create a named source backed by a GeoJSON payload
    fn add_geojson_source(&mut self, id: &str, data: GeoJson);

    /// Replace the payload of a named source
    fn set_source_data(&mut self, id: &str, data: GeoJson);

    /// Remove a named source; absent ids are a no-op
    fn remove_source(&mut self, id: &str);

    /// Create a styled layer bound to a named source
    fn add_layer(&mut self, spec: &LayerSpec);

    /// Remove a named layer; absent ids are a no-op
    fn remove_layer(&mut self, id: &str);

    /// Place a draggable marker and return its handle
    fn add_marker(&mut self, position: LngLat, style: &MarkerStyle) -> MarkerId;

    /// Remove a marker; absent handles are a no-op
    fn remove_marker(&mut self, marker: MarkerId);

    /// Current map zoom, if the host can report one
    fn zoom(&self) -> Option<f64>;

    /// Set the canvas cursor
    fn set_cursor(&mut self, cursor: Cursor);

    /// Route map clicks to the control while enabled
    fn set_click_capture(&mut self, enabled: bool);

    /// Emit a named notification observable by other map listeners
    fn fire_event(&mut self, name: &str);
}
