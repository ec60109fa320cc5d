use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Records
        .route("/api/v1/baches", post(handlers::create_bache).get(handlers::list_baches))
        .route("/api/v1/baches/export.csv", get(handlers::export_csv))
        .route("/api/v1/baches/{id}", get(handlers::get_bache).delete(handlers::delete_bache))
        .route("/api/v1/baches/{id}/geometry", put(handlers::edit_geometry))
        .route("/api/v1/baches/{id}/anchor", put(handlers::move_anchor))
        .route("/api/v1/baches/{id}/status", put(handlers::advance_status))
        .route("/api/v1/baches/{id}/evidence", post(handlers::attach_evidence))
        .route("/api/v1/baches/{id}/sketch.svg", get(handlers::sketch_svg))

        // Map and stateless helpers
        .route("/api/v1/map", get(handlers::map_overlay))
        .route("/api/v1/geometry/preview", post(handlers::preview_geometry))
        .route("/api/v1/calculator", post(handlers::calculate))
        .route("/api/v1/geocode", get(handlers::reverse_geocode))

        .with_state(state)
}
