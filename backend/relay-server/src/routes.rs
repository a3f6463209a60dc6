use crate::health;

use relay_ws::{RelayState, producer_handler, subscriber_handler};

use std::path::PathBuf;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
};

/// Producer listener: upgrades on any path
pub fn build_producer_router(state: RelayState) -> Router {
    Router::new()
        .route("/", get(producer_handler))
        .route("/{*path}", get(producer_handler))
        .with_state(state)
}

/// Subscriber listener: upgrades on any path
pub fn build_subscriber_router(state: RelayState) -> Router {
    Router::new()
        .route("/", get(subscriber_handler))
        .route("/{*path}", get(subscriber_handler))
        .with_state(state)
}

/// HTTP listener: viewer page plus health endpoints
pub fn build_page_router(state: RelayState, page_path: PathBuf) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(page_path))
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .with_state(state)
        // Viewer page may be opened from another origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
