//! Measurement session: the ordered sample list and everything derived
//! from it.
//!
//! The session owns the click-ordered samples and recomputes the full
//! cumulative distance sequence on every append. Recomputing instead of
//! patching keeps the parallel sequences from drifting; interactive click
//! rates make the O(n) cost irrelevant.

use geo::{Distance, Haversine, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use tracing::trace;

use crate::error::{Result, RulerError};
use crate::label::LabelFormat;
use crate::models::{DistanceUnit, LngLat, Sample};

/// Which property bag each point feature carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointProperties {
    /// Only the rendered label under `text` (the minimal overlay payload).
    LabelOnly,
    /// `id` (1-based), `text`, `elevation` (meters), and `length`
    /// (cumulative meters, nearest integer, as a string).
    Full,
}

/// Ordered list of measured samples with derived cumulative distances.
#[derive(Debug, Clone)]
pub struct MeasurementSession {
    samples: Vec<Sample>,
    /// Parallel to `samples`, in the configured unit; `cumulative[0] == 0`.
    cumulative: Vec<f64>,
    units: DistanceUnit,
    elevation_in_geometry: bool,
}

impl MeasurementSession {
    pub fn new(units: DistanceUnit) -> Self {
        Self {
            samples: Vec::new(),
            cumulative: Vec::new(),
            units,
            elevation_in_geometry: false,
        }
    }

    /// Emit point geometry with elevation as the third ordinate.
    pub fn with_elevation_geometry(mut self, enabled: bool) -> Self {
        self.elevation_in_geometry = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn units(&self) -> DistanceUnit {
        self.units
    }

    /// Clear all samples and derived state. Idempotent.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.cumulative.clear();
    }

    /// Append one sample in click order and recompute cumulative distances.
    pub fn append(&mut self, position: LngLat, elevation: f64) -> Result<()> {
        let sample = Sample::new(position, elevation)?;
        self.samples.push(sample);
        self.recompute_cumulative();
        trace!(
            len = self.samples.len(),
            elevation,
            "appended measurement sample"
        );
        Ok(())
    }

    /// Cumulative distance at `index`, in the configured unit.
    pub fn cumulative_distance_at(&self, index: usize) -> Result<f64> {
        self.cumulative
            .get(index)
            .copied()
            .ok_or(RulerError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })
    }

    fn recompute_cumulative(&mut self) {
        self.cumulative.clear();
        let mut sum = 0.0;
        for (i, sample) in self.samples.iter().enumerate() {
            if i > 0 {
                let prev: Point = self.samples[i - 1].position.into();
                let here: Point = sample.position.into();
                sum += self.units.from_meters(Haversine.distance(prev, here));
            }
            self.cumulative.push(sum);
        }
    }

    /// One label per sample under the given convention. The first point
    /// always gets distance zero by definition.
    pub fn labels(&self, format: &LabelFormat) -> Vec<String> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, sample)| format.render(self.cumulative[i], sample.elevation))
            .collect()
    }

    /// The measured path as a LineString of the ordered 2D positions.
    /// Degenerate lines (fewer than 2 points) are still emitted; callers
    /// that require a drawable line must suppress them.
    pub fn line_feature(&self) -> Feature {
        let coordinates: Vec<Vec<f64>> = self.samples.iter().map(|s| s.position.to_vec()).collect();
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(coordinates))),
            id: None,
            properties: Some(JsonObject::new()),
            foreign_members: None,
        }
    }

    /// One point feature per sample. `labels` must be parallel to the
    /// sample sequence (as produced by [`labels`](Self::labels)).
    pub fn point_collection(&self, labels: &[String], props: PointProperties) -> FeatureCollection {
        let features = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let mut properties = JsonObject::new();
                if let Some(text) = labels.get(i) {
                    properties.insert("text".to_string(), text.clone().into());
                }
                if props == PointProperties::Full {
                    let meters = self.units.to_meters(self.cumulative[i]).round() as i64;
                    properties.insert("id".to_string(), ((i + 1) as u64).into());
                    properties.insert("elevation".to_string(), sample.elevation.into());
                    properties.insert("length".to_string(), meters.to_string().into());
                }

                let mut position = sample.position.to_vec();
                if self.elevation_in_geometry {
                    position.push(sample.elevation);
                }

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(position))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelFormat;

    fn pos(lng: f64, lat: f64) -> LngLat {
        LngLat::new(lng, lat).unwrap()
    }

    fn session_with(points: &[(f64, f64, f64)]) -> MeasurementSession {
        let mut session = MeasurementSession::new(DistanceUnit::Kilometers);
        for &(lng, lat, elev) in points {
            session.append(pos(lng, lat), elev).unwrap();
        }
        session
    }

    #[test]
    fn test_first_cumulative_distance_is_zero() {
        let session = session_with(&[(29.898, -2.054, 1450.0)]);
        assert_eq!(session.cumulative_distance_at(0).unwrap(), 0.0);
    }

    #[test]
    fn test_cumulative_distance_accumulates() {
        let session = session_with(&[
            (29.898, -2.054, 1450.0),
            (29.950, -2.054, 1500.0),
            (30.000, -2.054, 1480.0),
        ]);
        let d1 = session.cumulative_distance_at(1).unwrap();
        let d2 = session.cumulative_distance_at(2).unwrap();
        assert!(d1 > 0.0);
        assert!(d2 > d1);
        // one degree of longitude at the equator is ~111 km; 0.052 deg ~ 5.8 km
        assert!((d1 - 5.78).abs() < 0.2, "d1 = {d1}");
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let session = session_with(&[(29.898, -2.054, 1450.0)]);
        let err = session.cumulative_distance_at(1).unwrap_err();
        assert!(matches!(err, RulerError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut session = session_with(&[(29.898, -2.054, 1450.0), (29.950, -2.054, 1500.0)]);
        session.reset();
        assert!(session.is_empty());
        assert!(session.cumulative_distance_at(0).is_err());
        session.reset();
        assert!(session.is_empty());
        assert_eq!(session.labels(&LabelFormat::default()).len(), 0);
    }

    #[test]
    fn test_label_count_matches_sample_count() {
        let session = session_with(&[
            (29.898, -2.054, 1450.0),
            (29.950, -2.054, 1500.0),
            (30.000, -2.054, 1480.0),
        ]);
        assert_eq!(session.labels(&LabelFormat::default()).len(), 3);
        let labels = session.labels(&LabelFormat::default_elevation_only());
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], "alt.1450m");
    }

    #[test]
    fn test_line_coordinates_match_sample_order() {
        let session = session_with(&[
            (29.898, -2.054, 1450.0),
            (29.950, -2.100, 1500.0),
            (30.000, -2.054, 1480.0),
        ]);
        let feature = session.line_feature();
        match feature.geometry.unwrap().value {
            Value::LineString(coords) => {
                assert_eq!(
                    coords,
                    vec![
                        vec![29.898, -2.054],
                        vec![29.950, -2.100],
                        vec![30.000, -2.054],
                    ]
                );
            }
            other => panic!("expected LineString, got {:?}", other),
        }
        assert_eq!(feature.properties, Some(JsonObject::new()));
    }

    #[test]
    fn test_degenerate_line_is_still_emitted() {
        let session = MeasurementSession::new(DistanceUnit::Kilometers);
        match session.line_feature().geometry.unwrap().value {
            Value::LineString(coords) => assert!(coords.is_empty()),
            other => panic!("expected LineString, got {:?}", other),
        }
    }

    #[test]
    fn test_point_collection_label_only() {
        let session = session_with(&[(29.898, -2.054, 1450.0), (29.950, -2.054, 1500.0)]);
        let labels = session.labels(&LabelFormat::default());
        let fc = session.point_collection(&labels, PointProperties::LabelOnly);
        assert_eq!(fc.features.len(), 2);
        let props = fc.features[0].properties.as_ref().unwrap();
        assert!(props.contains_key("text"));
        assert!(!props.contains_key("id"));
        assert!(!props.contains_key("length"));
    }

    #[test]
    fn test_point_collection_full_properties() {
        let session = session_with(&[(29.898, -2.054, 1450.0), (29.950, -2.054, 1500.0)]);
        let labels = session.labels(&LabelFormat::default());
        let fc = session.point_collection(&labels, PointProperties::Full);
        let props = fc.features[1].properties.as_ref().unwrap();
        assert_eq!(props["id"], 2);
        assert_eq!(props["elevation"], 1500.0);
        // length is the cumulative distance in whole meters, as a string
        let length: i64 = props["length"].as_str().unwrap().parse().unwrap();
        assert!((length - 5785).abs() < 200, "length = {length}");
    }

    #[test]
    fn test_point_geometry_with_elevation_ordinate() {
        let mut session =
            MeasurementSession::new(DistanceUnit::Kilometers).with_elevation_geometry(true);
        session.append(pos(29.898, -2.054), 1450.0).unwrap();
        let labels = session.labels(&LabelFormat::default());
        let fc = session.point_collection(&labels, PointProperties::LabelOnly);
        match &fc.features[0].geometry.as_ref().unwrap().value {
            Value::Point(coords) => assert_eq!(coords, &vec![29.898, -2.054, 1450.0]),
            other => panic!("expected Point, got {:?}", other),
        }
    }
}
