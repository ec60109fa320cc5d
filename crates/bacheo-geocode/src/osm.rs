use async_trait::async_trait;
use bacheo_core::config::{LayeredConfig, DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL};
use bacheo_core::error::{BacheoError, Result};
use bacheo_core::models::{GeoPoint, StreetMeta};
use serde::Deserialize;
use std::collections::HashMap;

use crate::ports::ReverseGeocoder;
use crate::streets::{main_street_from_address, nearest_by_name, pick_cross_streets, NearbyStreet};

/// Nominatim's usage policy requires an identifying user agent
const USER_AGENT: &str = concat!("bacheo/", env!("CARGO_PKG_VERSION"));

/// OpenStreetMap reverse geocoder
pub struct OsmGeocoder {
    /// Nominatim base URL (e.g., "https://nominatim.openstreetmap.org")
    nominatim_url: String,

    /// Overpass interpreter endpoint
    overpass_url: String,

    /// Search radius for cross streets, in meters
    radius_m: f64,

    /// HTTP client
    client: reqwest::Client,
}

impl OsmGeocoder {
    /// Create a new geocoder
    pub fn new(
        nominatim_url: impl Into<String>,
        overpass_url: impl Into<String>,
        radius_m: f64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build().map_err(|e| {
            BacheoError::Geocoding { reason: format!("Failed to build HTTP client: {}", e) }
        })?;

        Ok(Self {
            nominatim_url: nominatim_url.into().trim_end_matches('/').to_string(),
            overpass_url: overpass_url.into(),
            radius_m,
            client,
        })
    }

    /// Create with the public OpenStreetMap endpoints
    pub fn public(radius_m: f64) -> Result<Self> {
        Self::new(DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL, radius_m)
    }

    /// Create from layered configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::new(
            config.nominatim_url.value.clone(),
            config.overpass_url.value.clone(),
            config.street_search_radius_m.value,
        )
    }

    /// Main street at `point` via Nominatim reverse lookup
    pub async fn main_street(&self, point: GeoPoint) -> Result<String> {
        let url = format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}&addressdetails=1&zoom=18",
            self.nominatim_url, point.lat, point.lng
        );

        let response = self.client.get(&url).send().await.map_err(|e| BacheoError::Geocoding {
            reason: format!("Failed to connect to Nominatim: {}", e),
        })?;

        if !response.status().is_success() {
            return Err(BacheoError::Geocoding {
                reason: format!("Nominatim HTTP {}", response.status()),
            });
        }

        let body: NominatimResponse = response.json().await.map_err(|e| {
            BacheoError::Geocoding { reason: format!("Failed to parse Nominatim response: {}", e) }
        })?;

        Ok(main_street_from_address(&body.address))
    }

    /// Named streets within the search radius, nearest first
    pub async fn nearby_streets(&self, point: GeoPoint) -> Result<Vec<NearbyStreet>> {
        let query = overpass_query(point, self.radius_m);

        let response = self
            .client
            .post(&self.overpass_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=UTF-8")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(query)
            .send()
            .await
            .map_err(|e| BacheoError::Geocoding {
                reason: format!("Failed to connect to Overpass: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(BacheoError::Geocoding {
                reason: format!("Overpass HTTP {}", response.status()),
            });
        }

        let body: OverpassResponse = response.json().await.map_err(|e| {
            BacheoError::Geocoding { reason: format!("Failed to parse Overpass response: {}", e) }
        })?;

        Ok(nearest_by_name(point, body.named_centers()))
    }
}

#[async_trait]
impl ReverseGeocoder for OsmGeocoder {
    async fn reverse(&self, point: GeoPoint) -> Result<StreetMeta> {
        let (main, nearby) = tokio::join!(self.main_street(point), self.nearby_streets(point));

        let calle = main.unwrap_or_else(|e| {
            tracing::warn!(error = %e, lat = point.lat, lng = point.lng, "Main street lookup failed");
            String::new()
        });
        let nearby = nearby.unwrap_or_else(|e| {
            tracing::warn!(error = %e, lat = point.lat, lng = point.lng, "Cross street lookup failed");
            Vec::new()
        });

        let entre_calles = pick_cross_streets(&calle, &nearby);
        tracing::debug!(calle = %calle, cross = entre_calles.len(), "Reverse geocoded");
        Ok(StreetMeta::new(calle, entre_calles))
    }
}

/// Overpass QL for named highways around a point
fn overpass_query(point: GeoPoint, radius_m: f64) -> String {
    format!(
        "[out:json][timeout:25];\n(\n  way(around:{},{},{})[highway][name];\n);\nout center;\n",
        radius_m, point.lat, point.lng
    )
}

/// Response from Nominatim's reverse endpoint
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: HashMap<String, String>,
}

/// Response from the Overpass interpreter
#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
    center: Option<OverpassCenter>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassResponse {
    /// `(name, center)` of every element that has both
    fn named_centers(self) -> Vec<(String, GeoPoint)> {
        self.elements
            .into_iter()
            .filter_map(|el| {
                let center = el.center?;
                let name = el.tags.get("name")?.clone();
                Some((name, GeoPoint::new(center.lat, center.lon)))
            })
            .collect()
    }
}
