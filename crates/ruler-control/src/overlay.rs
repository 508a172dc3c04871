//! Overlay identifiers and layer/marker style construction.

use geojson::JsonObject;
use serde::Serialize;
use serde_json::json;

use ruler_core::ControlOptions;

// Fixed overlay identifiers. Only one measuring overlay may be active per
// host map at a time; a second control on the same map would collide.
pub const SOURCE_LINE: &str = "elev-controls-source-line";
pub const LAYER_LINE: &str = "elev-controls-layer-line";
pub const SOURCE_SYMBOL: &str = "elev-controls-source-symbol";
pub const LAYER_SYMBOL: &str = "elev-controls-layer-symbol";

pub const EVENT_MEASURING_ON: &str = "elevation.on";
pub const EVENT_MEASURING_OFF: &str = "elevation.off";

/// Visual kind of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Line,
    Symbol,
}

/// Style description for one overlay layer, serializable into a host-map
/// layer definition.
#[derive(Debug, Clone, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: String,
    pub paint: JsonObject,
    pub layout: JsonObject,
}

/// The measured-path line layer.
pub fn line_layer(options: &ControlOptions) -> LayerSpec {
    let mut paint = JsonObject::new();
    paint.insert("line-color".to_string(), json!(options.main_color));
    paint.insert("line-width".to_string(), json!(2));

    LayerSpec {
        id: LAYER_LINE.to_string(),
        kind: LayerKind::Line,
        source: SOURCE_LINE.to_string(),
        paint,
        layout: JsonObject::new(),
    }
}

/// The labelled-point symbol layer, reading its text from the `text`
/// property of the point source.
pub fn symbol_layer(options: &ControlOptions) -> LayerSpec {
    let mut layout = JsonObject::new();
    layout.insert("text-field".to_string(), json!("{text}"));
    layout.insert("text-font".to_string(), json!(options.font));
    layout.insert("text-size".to_string(), json!(options.font_size));
    layout.insert(
        "text-variable-anchor".to_string(),
        json!(["top", "bottom", "left", "right"]),
    );
    layout.insert("text-radial-offset".to_string(), json!(0.8));
    layout.insert("text-justify".to_string(), json!("auto"));

    let mut paint = JsonObject::new();
    paint.insert("text-color".to_string(), json!(options.main_color));
    paint.insert("text-halo-color".to_string(), json!(options.halo_color));
    paint.insert("text-halo-width".to_string(), json!(options.font_halo));

    LayerSpec {
        id: LAYER_SYMBOL.to_string(),
        kind: LayerKind::Symbol,
        source: SOURCE_SYMBOL.to_string(),
        paint,
        layout,
    }
}

/// Visual description of a clicked-point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    /// Marker diameter in pixels
    pub size_px: u32,
    /// Fill color
    pub fill: String,
    /// Border color
    pub border: String,
    /// Border width in pixels
    pub border_width: u32,
    pub draggable: bool,
}

/// The stock click marker: a 12px circle filled with the halo color and
/// bordered with the main color.
pub fn marker_style(options: &ControlOptions) -> MarkerStyle {
    MarkerStyle {
        size_px: 12,
        fill: options.halo_color.clone(),
        border: options.main_color.clone(),
        border_width: 2,
        draggable: true,
    }
}
