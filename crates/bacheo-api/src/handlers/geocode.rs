use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use bacheo_core::models::{GeoPoint, StreetMeta};

use crate::dto::GeocodeQuery;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn reverse_geocode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<StreetMeta>, ApiError> {
    let point = GeoPoint::new(query.lat, query.lng).validate()?;
    tracing::info!(lat = point.lat, lng = point.lng, "Reverse geocoding");

    let meta = state.geocoder.reverse(point).await?;
    Ok(Json(meta))
}
