use bacheo_core::config::ConfigSource;
use bacheo_core::models::{BoundingSpan, CurbSide, GeoPoint, ShapeKind, Vertex};
use bacheo_geo::{AsphaltEstimate, GeoBounds, LengthUnit};
use serde::Serialize;
use tabled::Tabled;

/// Output for preview command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutput {
    pub forma: ShapeKind,
    pub medidas: Vec<f64>,
    pub vertices: Vec<Vertex>,
    pub area: f64,
    pub curb_side: Option<CurbSide>,
    pub curb_options: Vec<CurbSide>,
    pub span: Option<BoundingSpan>,
    pub centroid: Option<Vertex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_path: Option<String>,
}

/// Output for project command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOutput {
    pub forma: ShapeKind,
    pub anchor: GeoPoint,
    pub shrink: f64,
    pub points: Vec<GeoPoint>,
    pub bounds: Option<GeoBounds>,
    pub curb_edge: Option<[GeoPoint; 2]>,
}

/// Output for calc command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcOutput {
    pub unidad: LengthUnit,
    pub densidad: f64,
    #[serde(flatten)]
    pub estimate: AsphaltEstimate,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub entries: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}

/// Table row for vertex listings
#[derive(Debug, Tabled)]
pub struct VertexRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "x (m)")]
    pub x: String,
    #[tabled(rename = "y (m)")]
    pub y: String,
}

impl VertexRow {
    pub fn from_vertices(vertices: &[Vertex]) -> Vec<Self> {
        vertices
            .iter()
            .enumerate()
            .map(|(index, v)| Self { index, x: format!("{:.3}", v.x), y: format!("{:.3}", v.y) })
            .collect()
    }
}

/// Table row for projected points
#[derive(Debug, Tabled)]
pub struct PointRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub lat: String,
    pub lng: String,
}

impl PointRow {
    pub fn from_points(points: &[GeoPoint]) -> Vec<Self> {
        points
            .iter()
            .enumerate()
            .map(|(index, p)| Self { index, lat: format!("{:.7}", p.lat), lng: format!("{:.7}", p.lng) })
            .collect()
    }
}

/// Table row for configuration values
#[derive(Debug, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
