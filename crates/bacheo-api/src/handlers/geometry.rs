use std::sync::Arc;

use axum::{extract::State, Json};
use bacheo_lifecycle::GeometryPreview;

use crate::dto::{CalculatorRequest, CalculatorResponse, PreviewRequest};
use crate::error::ApiError;
use crate::services::CalculatorService;
use crate::state::AppState;

/// Derive shape, vertices and area from measurement text without saving
pub async fn preview_geometry(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<GeometryPreview>, ApiError> {
    let preview = state.manager.preview(&request.medidas, request.curb_side.as_deref())?;

    tracing::debug!(forma = %preview.shape.forma(), area = preview.shape.area(), "Previewed geometry");
    Ok(Json(preview))
}

pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalculatorRequest>,
) -> Result<Json<CalculatorResponse>, ApiError> {
    tracing::info!(rows = request.rows.len(), "Running asphalt calculator");

    let response = CalculatorService::estimate(&request, state.config.asphalt_density.value)?;
    Ok(Json(response))
}
