//! Geometry value types shared by the polygon engine and its renderers.
//!
//! Local geometry lives in an unanchored metric plane: `(0, 0)` is the
//! top-left reference corner of the measured shape, `+x` runs along the top
//! edge and `+y` runs "down" the screen (south once projected on a map).

use serde::{Deserialize, Serialize};

use crate::error::{BacheoError, Result};

/// Approximate length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Minimum width/height reported by a [`BoundingSpan`].
pub const SPAN_EPSILON: f64 = 1e-4;

/// A point in the local metric plane (meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub const ORIGIN: Vertex = Vertex { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// GPS coordinate in decimal degrees (WGS 84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reject non-finite or out-of-range coordinates
    pub fn validate(self) -> Result<Self> {
        let in_range = self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng);
        if in_range {
            Ok(self)
        } else {
            Err(BacheoError::InvalidCoordinates { lat: self.lat, lng: self.lng })
        }
    }

    /// `[lat, lng]` pair, the order map widgets expect
    pub fn to_lat_lng(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// `[lng, lat]` pair, the order GeoJSON expects
    pub fn to_lng_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Shape kind chosen from the number of measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    #[serde(rename = "triangulo")]
    Triangle,
    #[serde(rename = "trapecio")]
    Trapezoid,
}

impl ShapeKind {
    /// Number of vertices the builder emits for this kind
    pub fn vertex_count(&self) -> usize {
        match self {
            ShapeKind::Triangle => 3,
            ShapeKind::Trapezoid => 4,
        }
    }

    /// Infer the kind from a vertex list length
    pub fn from_vertex_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(ShapeKind::Triangle),
            4 => Some(ShapeKind::Trapezoid),
            _ => None,
        }
    }

    /// Persisted `forma` token
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangulo",
            ShapeKind::Trapezoid => "trapecio",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge measurements, tagged by the shape they describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementSet {
    Triangle { base_top: f64, h_right: f64, h_left: f64 },
    Trapezoid { w_top: f64, h_right: f64, w_bottom: f64, h_left: f64 },
}

impl MeasurementSet {
    /// Classify parsed values: 3 values make a triangle, 4 or more make a
    /// trapezoid from the first 4. Fewer than 3 describe no shape.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        match values {
            [base_top, h_right, h_left] => Some(MeasurementSet::Triangle {
                base_top: *base_top,
                h_right: *h_right,
                h_left: *h_left,
            }),
            [w_top, h_right, w_bottom, h_left, ..] => Some(MeasurementSet::Trapezoid {
                w_top: *w_top,
                h_right: *h_right,
                w_bottom: *w_bottom,
                h_left: *h_left,
            }),
            _ => None,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            MeasurementSet::Triangle { .. } => ShapeKind::Triangle,
            MeasurementSet::Trapezoid { .. } => ShapeKind::Trapezoid,
        }
    }
}

/// Axis-aligned extent of a vertex list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSpan {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingSpan {
    /// Horizontal extent, never below [`SPAN_EPSILON`]
    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(SPAN_EPSILON)
    }

    /// Vertical extent, never below [`SPAN_EPSILON`]
    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(SPAN_EPSILON)
    }
}

/// A polygon derived from a measurement set.
///
/// Only the builder creates these, so `area` always equals the shoelace
/// area of `vertices` and the vertex order always matches the curb edge
/// tables. Serialize-only; stored shapes are rebuilt from their measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    forma: ShapeKind,
    vertices: Vec<Vertex>,
    area: f64,
}

impl Polygon {
    pub(crate) fn new(forma: ShapeKind, vertices: Vec<Vertex>, area: f64) -> Self {
        Self { forma, vertices, area }
    }

    pub fn forma(&self) -> ShapeKind {
        self.forma
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Area in square meters
    pub fn area(&self) -> f64 {
        self.area
    }
}
