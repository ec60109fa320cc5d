use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bacheo_core::models::{
    BacheId, BacheRecord, BacheStatus, EvidencePhase, GeometryEdit, ListFilter, NewBache,
};
use bacheo_geo::SketchOptions;
use bacheo_lifecycle::to_csv;

use crate::dto::{
    AnchorRequest, DeleteResponse, EvidenceRequest, ListQuery, SketchQuery, StatusRequest,
};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn create_bache(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewBache>,
) -> Result<(StatusCode, Json<BacheRecord>), ApiError> {
    tracing::info!(calle = %request.street.calle, "Creating bache");

    let record = state.manager.create(&request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_baches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BacheRecord>>, ApiError> {
    tracing::info!(residente = ?query.residente, "Listing baches");

    let records = state.manager.list(&ListFilter { residente_uid: query.residente }).await?;
    Ok(Json(records))
}

pub async fn get_bache(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BacheRecord>, ApiError> {
    let record = state.manager.get(parse_id(&id)?).await?;
    Ok(Json(record))
}

pub async fn delete_bache(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(id = %id, "Deleting bache");

    state.manager.delete(parse_id(&id)?).await?;
    Ok(Json(DeleteResponse { success: true, message: format!("Bache {} deleted", id) }))
}

pub async fn edit_geometry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<GeometryEdit>,
) -> Result<Json<BacheRecord>, ApiError> {
    tracing::info!(id = %id, "Editing bache geometry");

    let record = state.manager.edit_geometry(parse_id(&id)?, &request).await?;
    Ok(Json(record))
}

pub async fn move_anchor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<AnchorRequest>,
) -> Result<Json<BacheRecord>, ApiError> {
    tracing::info!(id = %id, "Moving bache anchor");

    let record = state.manager.move_anchor(parse_id(&id)?, request.coordenadas).await?;
    Ok(Json(record))
}

pub async fn advance_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<BacheRecord>, ApiError> {
    let status: BacheStatus = request.status.parse()?;
    tracing::info!(id = %id, status = %status, "Advancing bache status");

    let record = state.manager.advance_status(parse_id(&id)?, status).await?;
    Ok(Json(record))
}

pub async fn attach_evidence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<EvidenceRequest>,
) -> Result<Json<BacheRecord>, ApiError> {
    let phase: EvidencePhase = request.phase.parse()?;
    if request.url.trim().is_empty() {
        return Err(ApiError::bad_request("Evidence URL is required"));
    }

    let record = state.manager.attach_evidence(parse_id(&id)?, phase, &request.url).await?;
    Ok(Json(record))
}

pub async fn sketch_svg(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SketchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut options = SketchOptions::default();
    if let Some(width) = query.width.filter(|w| w.is_finite() && *w > 0.0) {
        options.width = width;
    }
    if let Some(height) = query.height.filter(|h| h.is_finite() && *h > 0.0) {
        options.height = height;
    }

    let svg = state.manager.sketch(parse_id(&id)?, &options).await?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.manager.list(&ListFilter { residente_uid: query.residente }).await?;
    tracing::info!(rows = records.len(), "Exporting baches as CSV");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"baches.csv\""),
        ],
        to_csv(&records),
    ))
}

/// Malformed ids cannot name a stored record, so they are reported as 404
fn parse_id(raw: &str) -> Result<BacheId, ApiError> {
    Ok(raw.parse::<BacheId>()?)
}
