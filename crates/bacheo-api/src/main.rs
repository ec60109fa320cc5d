use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use bacheo_geocode::OsmGeocoder;
use bacheo_store::MemoryBacheStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bacheo_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bacheo_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = api_config.layered().context("Failed to load configuration")?;

    tracing::info!(
        port = api_config.port,
        shrink_factor = config.shrink_factor.value,
        curb_validity = ?config.curb_validity.value,
        "Starting Bacheo API server"
    );

    let geocoder = OsmGeocoder::from_config(&config).context("Failed to build geocoder")?;
    let state = AppState::new(Arc::new(MemoryBacheStore::new()), Arc::new(geocoder), config)
        .context("Invalid configuration")?;

    let origin = api_config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", api_config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(Arc::new(state)).layer(cors).layer(TraceLayer::new_for_http());

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
