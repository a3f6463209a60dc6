#![allow(dead_code)]

//! Test infrastructure for relay-server routers

use relay_config::ProducerPolicy;
use relay_server::{build_page_router, build_producer_router, build_subscriber_router};
use relay_ws::{ConnectionConfig, ConnectionLimits, RelayState, ShutdownCoordinator};

use std::path::PathBuf;

use axum::Router;
use axum_test::TestServer;
use tokio::time::{Duration, Instant, sleep};

/// All three listeners of one relay
pub struct TestServers {
    pub producer: TestServer,
    pub subscriber: TestServer,
    pub http: TestServer,
    pub state: RelayState,
}

/// Create RelayState for testing
pub fn create_test_state() -> RelayState {
    RelayState::new(
        ConnectionConfig::default(),
        ConnectionLimits::default(),
        ProducerPolicy::Shared,
        ShutdownCoordinator::new(),
    )
}

pub fn create_test_servers(page_path: PathBuf) -> TestServers {
    let state = create_test_state();

    TestServers {
        producer: build_server(build_producer_router(state.clone())),
        subscriber: build_server(build_subscriber_router(state.clone())),
        http: build_server(build_page_router(state.clone(), page_path)),
        state,
    }
}

fn build_server(app: Router) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server")
}

/// Poll until `count` subscribers are Open
pub async fn wait_for_open_subscribers(state: &RelayState, count: usize) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while state.subscribers.open_count().await != count {
        assert!(
            Instant::now() < deadline,
            "expected {count} open subscribers"
        );
        sleep(Duration::from_millis(10)).await;
    }
}
