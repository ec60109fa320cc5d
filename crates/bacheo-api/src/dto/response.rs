use bacheo_core::models::GeoPoint;
use bacheo_geo::{AsphaltEstimate, AsphaltTotals, GeoBounds};
use geojson::FeatureCollection;
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "bacheo-api" }
    }
}

/// Delete operation response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Map layer with the view it should be fitted to
#[derive(Debug, Serialize)]
pub struct MapResponse {
    #[serde(flatten)]
    pub features: FeatureCollection,
    pub bounds: Option<GeoBounds>,
    pub center: Option<GeoPoint>,
}

/// Calculator response
#[derive(Debug, Serialize)]
pub struct CalculatorResponse {
    pub rows: Vec<AsphaltEstimate>,
    pub totals: AsphaltTotals,
}
