//! The measuring-mode controller.
//!
//! Owns the session and the overlay lifecycle. Two logical states exist,
//! idle and measuring; every overlay resource created on the way into
//! measuring is removed on the way out. Click handling is split in two so
//! the elevation await never pins the controller: `begin_click` captures
//! the click while measuring, `resolve_click` applies the sampled outcome,
//! and a generation counter lets resolutions that arrive after measuring
//! stopped be detected and discarded.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use geojson::GeoJson;
use tracing::{debug, warn};

use ruler_core::{ControlOptions, LngLat, MeasurementSession, PointProperties, Result};
use ruler_terrain::{ElevationSampler, TerrainRgb};

use crate::overlay::{
    self, EVENT_MEASURING_OFF, EVENT_MEASURING_ON, LAYER_LINE, LAYER_SYMBOL, SOURCE_LINE,
    SOURCE_SYMBOL,
};
use crate::ports::{Cursor, HostMap, MarkerId};

/// Sampling zoom used when the host cannot report one.
pub const DEFAULT_ZOOM: u8 = 15;

/// A click captured while measuring, waiting for its elevation.
#[derive(Debug, Clone, Copy)]
pub struct PendingClick {
    position: LngLat,
    zoom: u8,
    generation: u64,
}

impl PendingClick {
    pub fn position(&self) -> LngLat {
        self.position
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
}

/// Elevation and distance measurement control for a host map.
pub struct RulerControl<H: HostMap> {
    host: Option<H>,
    session: MeasurementSession,
    options: ControlOptions,
    sampler: Arc<dyn ElevationSampler>,
    markers: Vec<MarkerId>,
    measuring: bool,
    /// Bumped whenever measuring stops; in-flight clicks from an earlier
    /// generation are discarded on resolution.
    generation: u64,
}

impl<H: HostMap> RulerControl<H> {
    pub fn new(sampler: Arc<dyn ElevationSampler>, options: ControlOptions) -> Self {
        let session = MeasurementSession::new(options.units)
            .with_elevation_geometry(options.elevation_in_geometry);
        Self {
            host: None,
            session,
            options,
            sampler,
            markers: Vec::new(),
            measuring: false,
            generation: 0,
        }
    }

    /// Construct with the stock elevation collaborator: a Terrain-RGB
    /// tileset addressed by a `{z}/{x}/{y}` URL template, read at the
    /// configured tile size.
    pub fn with_tileset(url_template: impl Into<String>, options: ControlOptions) -> Self {
        let sampler = Arc::new(TerrainRgb::new(url_template, options.tile_size));
        Self::new(sampler, options)
    }

    /// Where the host should place the control by default.
    pub fn default_position() -> &'static str {
        "top-right"
    }

    pub fn is_measuring(&self) -> bool {
        self.measuring
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    /// Bind the control to a host map.
    pub fn attach(&mut self, host: H) {
        self.host = Some(host);
    }

    /// Tear the control down and release the host. Stops measuring first
    /// when still active.
    pub fn detach(&mut self) -> Option<H> {
        if self.measuring {
            self.stop_measuring();
        }
        self.host.take()
    }

    /// Enter measuring mode: fresh session, empty overlay sources and
    /// layers, crosshair cursor, click capture, `elevation.on`.
    /// No-op when already measuring or detached.
    pub fn start_measuring(&mut self) {
        if self.measuring || self.host.is_none() {
            return;
        }
        self.session.reset();
        self.markers.clear();
        self.measuring = true;

        let line = GeoJson::Feature(self.session.line_feature());
        let points = GeoJson::FeatureCollection(
            self.session.point_collection(&[], PointProperties::LabelOnly),
        );
        let line_layer = overlay::line_layer(&self.options);
        let symbol_layer = overlay::symbol_layer(&self.options);

        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.set_cursor(Cursor::Crosshair);
        host.add_geojson_source(SOURCE_LINE, line);
        host.add_geojson_source(SOURCE_SYMBOL, points);
        host.add_layer(&line_layer);
        host.add_layer(&symbol_layer);
        host.set_click_capture(true);
        host.fire_event(EVENT_MEASURING_ON);
        debug!("measuring on");
    }

    /// Leave measuring mode, removing every overlay resource created on
    /// entry. Safe no-op from idle.
    pub fn stop_measuring(&mut self) {
        if !self.measuring {
            return;
        }
        self.measuring = false;
        self.generation += 1;

        let markers = std::mem::take(&mut self.markers);
        if let Some(host) = self.host.as_mut() {
            host.set_click_capture(false);
            host.set_cursor(Cursor::Default);
            host.remove_layer(LAYER_LINE);
            host.remove_layer(LAYER_SYMBOL);
            host.remove_source(SOURCE_LINE);
            host.remove_source(SOURCE_SYMBOL);
            for marker in markers {
                host.remove_marker(marker);
            }
            host.fire_event(EVENT_MEASURING_OFF);
        }
        debug!("measuring off");
    }

    /// Button behavior: flip between idle and measuring.
    pub fn toggle(&mut self) {
        if self.measuring {
            self.stop_measuring();
        } else {
            self.start_measuring();
        }
    }

    /// Capture a click for elevation sampling. Returns `None` while idle
    /// or detached; clicks are only measured in measuring mode.
    pub fn begin_click(&self, position: LngLat) -> Option<PendingClick> {
        if !self.measuring {
            return None;
        }
        let host = self.host.as_ref()?;
        let zoom = host
            .zoom()
            .map(|z| z.round() as u8)
            .unwrap_or(DEFAULT_ZOOM);
        Some(PendingClick {
            position,
            zoom,
            generation: self.generation,
        })
    }

    /// Apply a resolved elevation lookup. A failed lookup drops the click;
    /// a resolution from a stale generation, or arriving while idle or
    /// detached, is discarded without touching the session or the host.
    pub fn resolve_click(&mut self, pending: PendingClick, outcome: Result<f64>) {
        let elevation = match outcome {
            Ok(elevation) => elevation,
            Err(e) => {
                warn!(error = %e, "elevation lookup failed, click dropped");
                return;
            }
        };
        if !self.measuring || pending.generation != self.generation || self.host.is_none() {
            debug!("discarding stale elevation resolution");
            return;
        }

        let elevation = if self.options.clamp_negative_elevation && elevation < 0.0 {
            0.0
        } else {
            elevation
        };

        if let Err(e) = self.session.append(pending.position, elevation) {
            warn!(error = %e, "sampled elevation rejected, click dropped");
            return;
        }

        let style = overlay::marker_style(&self.options);
        let Some(host) = self.host.as_mut() else {
            return;
        };
        let marker = host.add_marker(pending.position, &style);
        self.markers.push(marker);
        self.refresh_overlay();
    }

    /// Full click protocol: capture, await elevation, apply.
    pub async fn handle_click(&mut self, position: LngLat) {
        let Some(pending) = self.begin_click(position) else {
            return;
        };
        let sampler = Arc::clone(&self.sampler);
        let outcome = sampler.elevation(pending.position, pending.zoom).await;
        self.resolve_click(pending, outcome);
    }

    /// Drop all measured points and markers and re-initialize the empty
    /// overlay, without leaving measuring mode or emitting on/off events.
    /// No-op while idle.
    pub fn clear(&mut self) {
        if !self.measuring || self.host.is_none() {
            return;
        }
        self.session.reset();

        let markers = std::mem::take(&mut self.markers);
        let line = GeoJson::Feature(self.session.line_feature());
        let points = GeoJson::FeatureCollection(
            self.session.point_collection(&[], PointProperties::LabelOnly),
        );
        let line_layer = overlay::line_layer(&self.options);
        let symbol_layer = overlay::symbol_layer(&self.options);

        let Some(host) = self.host.as_mut() else {
            return;
        };
        host.remove_layer(LAYER_LINE);
        host.remove_layer(LAYER_SYMBOL);
        host.remove_source(SOURCE_LINE);
        host.remove_source(SOURCE_SYMBOL);
        for marker in markers {
            host.remove_marker(marker);
        }
        host.add_geojson_source(SOURCE_LINE, line);
        host.add_geojson_source(SOURCE_SYMBOL, points);
        host.add_layer(&line_layer);
        host.add_layer(&symbol_layer);
    }

    /// Serialize the measured path as a GeoJSON FeatureCollection: point
    /// features with `id`, `elevation`, and `length` properties (no label
    /// text), plus the path LineString when at least two points exist.
    /// `None` with an empty session.
    pub fn export_geojson(&self) -> Option<String> {
        if self.session.is_empty() {
            return None;
        }
        let labels = self.session.labels(&self.options.label);
        let mut collection = self.session.point_collection(&labels, PointProperties::Full);
        for feature in &mut collection.features {
            if let Some(properties) = feature.properties.as_mut() {
                properties.remove("text");
            }
        }
        if self.session.len() >= 2 {
            collection.features.push(self.session.line_feature());
        }
        Some(GeoJson::FeatureCollection(collection).to_string())
    }

    /// Write the export payload to a file. Returns whether a file was
    /// produced; exporting an empty session produces nothing.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        match self.export_geojson() {
            Some(payload) => {
                fs::write(path, payload)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Push the current line and labelled points into the overlay sources.
    fn refresh_overlay(&mut self) {
        let labels = self.session.labels(&self.options.label);
        let line = GeoJson::Feature(self.session.line_feature());
        let points = GeoJson::FeatureCollection(
            self.session
                .point_collection(&labels, PointProperties::LabelOnly),
        );
        if let Some(host) = self.host.as_mut() {
            host.set_source_data(SOURCE_LINE, line);
            host.set_source_data(SOURCE_SYMBOL, points);
        }
    }
}
