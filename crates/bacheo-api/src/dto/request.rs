use bacheo_core::models::GeoPoint;
use serde::Deserialize;

/// `?residente=` filter for listings and the map
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub residente: Option<String>,
}

/// Map query: optional user location plus the listing filter
#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub residente: Option<String>,
}

impl MapQuery {
    /// User location, only when both coordinates are present
    pub fn user_location(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.lat?, self.lng?))
    }
}

/// Move-anchor request body
#[derive(Debug, Deserialize)]
pub struct AnchorRequest {
    pub coordenadas: GeoPoint,
}

/// Status change request body
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Evidence request body; `phase` is before, during or after
#[derive(Debug, Deserialize)]
pub struct EvidenceRequest {
    pub phase: String,
    pub url: String,
}

/// Geometry preview request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub medidas: String,
    #[serde(default)]
    pub curb_side: Option<String>,
}

/// Sketch size in pixels
#[derive(Debug, Default, Deserialize)]
pub struct SketchQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Reverse geocoding query
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub lat: f64,
    pub lng: f64,
}

/// One calculator row; unit defaults to meters and density to the
/// configured value
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorRow {
    pub largo: f64,
    pub ancho: f64,
    pub esp_asfalto: f64,
    pub esp_escombro: f64,
    #[serde(default)]
    pub unidad: Option<String>,
    #[serde(default)]
    pub densidad: Option<f64>,
}

/// Calculator request body
#[derive(Debug, Deserialize)]
pub struct CalculatorRequest {
    pub rows: Vec<CalculatorRow>,
}
