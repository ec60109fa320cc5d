//! Conversions to the `geo` and `geojson` crates, and the map overlay.
//!
//! `geo` types use `x = lng, y = lat`.

use bacheo_core::models::{BacheRecord, GeoPoint};
use geo::{Coord, LineString, Point, Polygon};
use geojson::{Feature, FeatureCollection};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::curb::curb_edge;
use crate::projection::{GeoBounds, GeoProjector, MAP_BOUNDS_PAD};

type JsonObject = Map<String, JsonValue>;

/// Convert a GPS point to a `geo::Point`
pub fn to_geo_point(point: GeoPoint) -> Point<f64> {
    Point::new(point.lng, point.lat)
}

/// Convert a `geo::Point` back to a GPS point
pub fn from_geo_point(point: Point<f64>) -> GeoPoint {
    GeoPoint::new(point.y(), point.x())
}

/// Closed polygon ring from projected points
pub fn to_geo_polygon(points: &[GeoPoint]) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = points.iter().map(|p| Coord { x: p.lng, y: p.lat }).collect();
    Polygon::new(LineString::new(ring), vec![])
}

/// Feature kinds in the overlay, exposed as the `kind` property
const KIND_POLYGON: &str = "bache";
const KIND_CURB: &str = "curb";
const KIND_ANCHOR: &str = "anchor";

/// GeoJSON layer plus the padded bounds a map view should fit
#[derive(Debug, Clone, Serialize)]
pub struct MapOverlay {
    pub features: FeatureCollection,
    pub bounds: Option<GeoBounds>,
}

/// Build the map overlay for a set of records.
///
/// Each record yields a `Polygon` feature with its projected outline, a
/// `LineString` for its curb edge when it has one, and a `Point` at its
/// anchor. Bounds cover every projected point plus the user location and
/// are padded the way the map view pads them.
pub fn map_overlay(
    records: &[BacheRecord],
    projector: &GeoProjector,
    user: Option<GeoPoint>,
) -> MapOverlay {
    let mut features = Vec::with_capacity(records.len() * 3);

    for record in records {
        let outline = projector.project_record(record);
        let props = record_properties(record);

        if !outline.is_empty() {
            let polygon = to_geo_polygon(&outline);
            features.push(feature(
                geojson::Value::from(&polygon),
                Some(record.id.to_string()),
                with_kind(props.clone(), KIND_POLYGON),
            ));
        }

        if let Some((a, b)) =
            record.curb_side.and_then(|side| curb_edge(record.forma(), &outline, side))
        {
            let line = LineString::new(vec![
                Coord { x: a.lng, y: a.lat },
                Coord { x: b.lng, y: b.lat },
            ]);
            let mut curb_props = with_kind(props.clone(), KIND_CURB);
            if let Some(side) = record.curb_side {
                curb_props.insert("curbSide".to_string(), JsonValue::from(side.as_str()));
            }
            features.push(feature(geojson::Value::from(&line), None, curb_props));
        }

        features.push(feature(
            geojson::Value::from(&to_geo_point(record.coordenadas)),
            None,
            with_kind(props, KIND_ANCHOR),
        ));
    }

    let points = projector.collect_bounds(records, user);
    let bounds = GeoBounds::from_points(&points).map(|b| b.pad(MAP_BOUNDS_PAD));

    MapOverlay {
        features: FeatureCollection { bbox: None, features, foreign_members: None },
        bounds,
    }
}

fn record_properties(record: &BacheRecord) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("noBache".to_string(), JsonValue::from(record.no_bache));
    props.insert("calle".to_string(), JsonValue::from(record.street.calle.clone()));
    props.insert("area".to_string(), JsonValue::from(record.area()));
    props.insert("status".to_string(), JsonValue::from(record.status.as_str()));
    props.insert("forma".to_string(), JsonValue::from(record.forma().as_str()));
    props
}

fn with_kind(mut props: JsonObject, kind: &str) -> JsonObject {
    props.insert("kind".to_string(), JsonValue::from(kind));
    props
}

fn feature(value: geojson::Value, id: Option<String>, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(value)),
        id: id.map(geojson::feature::Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}
