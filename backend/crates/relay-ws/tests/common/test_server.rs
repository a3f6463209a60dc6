#![allow(dead_code)]

use relay_config::ProducerPolicy;
use relay_ws::{
    ConnectionConfig, ConnectionLimits, RelayState, ShutdownCoordinator, producer_handler,
    subscriber_handler,
};

use axum::{Router, routing::get};
use axum_test::TestServer;
use tokio::time::{Duration, Instant, sleep};

/// How long helpers wait for the relay to catch up with client actions
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for test relay instances
#[derive(Debug, Clone)]
pub struct TestRelayConfig {
    pub max_subscribers: usize,
    pub send_buffer_size: usize,
    pub max_frame_bytes: usize,
    pub policy: ProducerPolicy,
}

impl Default for TestRelayConfig {
    fn default() -> Self {
        Self {
            max_subscribers: 100,
            send_buffer_size: 32,
            max_frame_bytes: 1024 * 1024,
            policy: ProducerPolicy::Shared,
        }
    }
}

impl TestRelayConfig {
    /// Create config that allows a single subscriber (for limit tests)
    pub fn with_single_subscriber() -> Self {
        Self {
            max_subscribers: 1,
            ..Default::default()
        }
    }

    /// Create config where a new producer closes the previous one
    pub fn with_supersede_policy() -> Self {
        Self {
            policy: ProducerPolicy::Supersede,
            ..Default::default()
        }
    }

    /// Create config where a subscriber falls behind after a single frame
    pub fn with_tiny_buffer() -> Self {
        Self {
            send_buffer_size: 1,
            ..Default::default()
        }
    }

    /// Create config with a small producer message limit
    pub fn with_small_frames() -> Self {
        Self {
            max_frame_bytes: 1024,
            ..Default::default()
        }
    }
}

/// Producer and subscriber listeners sharing one relay
pub struct TestRelay {
    pub producer: TestServer,
    pub subscriber: TestServer,
    pub state: RelayState,
}

/// Create a TestRelay with default configuration
pub fn create_test_relay() -> TestRelay {
    create_test_relay_with_config(TestRelayConfig::default())
}

/// Create a TestRelay with custom configuration
pub fn create_test_relay_with_config(config: TestRelayConfig) -> TestRelay {
    let state = RelayState::new(
        ConnectionConfig {
            send_buffer_size: config.send_buffer_size,
            max_frame_bytes: config.max_frame_bytes,
        },
        ConnectionLimits {
            max_subscribers: config.max_subscribers,
        },
        config.policy,
        ShutdownCoordinator::new(),
    );

    let producer_app = Router::new()
        .route("/", get(producer_handler))
        .with_state(state.clone());
    let subscriber_app = Router::new()
        .route("/", get(subscriber_handler))
        .with_state(state.clone());

    TestRelay {
        producer: build_server(producer_app),
        subscriber: build_server(subscriber_app),
        state,
    }
}

fn build_server(app: Router) -> TestServer {
    TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server")
}

/// Wait until `count` subscribers are Open
pub async fn wait_for_open_subscribers(state: &RelayState, count: usize) {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while state.subscribers.open_count().await != count {
        assert!(
            Instant::now() < deadline,
            "expected {count} open subscribers, have {}",
            state.subscribers.open_count().await
        );
        sleep(Duration::from_millis(10)).await;
    }
}

/// Wait until the registry holds exactly `count` subscribers
pub async fn wait_for_registered_subscribers(state: &RelayState, count: usize) {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while state.subscribers.total_count().await != count {
        assert!(
            Instant::now() < deadline,
            "expected {count} registered subscribers, have {}",
            state.subscribers.total_count().await
        );
        sleep(Duration::from_millis(10)).await;
    }
}

/// Wait until exactly `count` producers are registered
pub async fn wait_for_producers(state: &RelayState, count: usize) {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while state.producers.active_count().await != count {
        assert!(
            Instant::now() < deadline,
            "expected {count} producers, have {}",
            state.producers.active_count().await
        );
        sleep(Duration::from_millis(10)).await;
    }
}
