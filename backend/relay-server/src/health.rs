use relay_ws::RelayState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - relay status with live producer and subscriber counts
pub async fn health_check(State(state): State<RelayState>) -> Response {
    let shutting_down = state.shutdown.is_shutdown();

    let health = json!({
        "status": if shutting_down { "shutting_down" } else { "healthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "producers": {
            "active": state.producers.active_count().await,
            "policy": state.producers.policy().to_string(),
        },
        "subscribers": {
            "registered": state.subscribers.total_count().await,
            "open": state.subscribers.open_count().await,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let status = if shutting_down {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status, Json(health)).into_response()
}

/// GET /live - liveness probe
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}
