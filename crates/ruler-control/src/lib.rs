//! Ruler Control - The measuring-mode controller
//!
//! Bridges the measurement session to a host map: toggles measuring mode,
//! turns resolved clicks into session samples, and keeps the line and
//! labelled-point overlay sources in sync. The host map itself stays behind
//! the [`HostMap`] capability port; elevation lookups go through the
//! [`ElevationSampler`](ruler_terrain::ElevationSampler) port.

pub mod controller;
pub mod overlay;
pub mod ports;

pub use controller::{PendingClick, RulerControl, DEFAULT_ZOOM};
pub use overlay::{LayerKind, LayerSpec, MarkerStyle};
pub use ports::{Cursor, HostMap, MarkerId};
