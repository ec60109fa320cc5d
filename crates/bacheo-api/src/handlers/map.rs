use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::{MapQuery, MapResponse};
use crate::error::ApiError;
use crate::services::MapService;
use crate::state::AppState;

pub async fn map_overlay(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapResponse>, ApiError> {
    tracing::info!(
        has_user = query.user_location().is_some(),
        residente = ?query.residente,
        "Building map overlay"
    );

    let response = MapService::overlay(&state, &query).await?;
    Ok(Json(response))
}
