
use relay_config::ProducerPolicy;
use relay_ws::{ConnectionConfig, ConnectionLimits, RelayState, ShutdownCoordinator};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub(crate) fn test_state() -> RelayState {
    RelayState::new(
        ConnectionConfig::default(),
        ConnectionLimits::default(),
        ProducerPolicy::Shared,
        ShutdownCoordinator::new(),
    )
}

pub(crate) async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap()
}

pub(crate) async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
