use bacheo_core::models::ListFilter;

use crate::dto::{MapQuery, MapResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Service for the map layer
pub struct MapService;

impl MapService {
    /// Build the GeoJSON overlay and the view it should be fitted to
    pub async fn overlay(state: &AppState, query: &MapQuery) -> Result<MapResponse, ApiError> {
        let filter = ListFilter { residente_uid: query.residente.clone() };
        let user = match query.user_location() {
            Some(point) => Some(point.validate()?),
            None => None,
        };

        let overlay = state.manager.overlay(&filter, user).await?;
        let center = overlay.bounds.map(|b| b.center()).or(user);

        tracing::debug!(
            features = overlay.features.features.len(),
            has_bounds = overlay.bounds.is_some(),
            "Built map overlay"
        );

        Ok(MapResponse { features: overlay.features, bounds: overlay.bounds, center })
    }
}
