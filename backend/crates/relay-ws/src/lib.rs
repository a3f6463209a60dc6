pub mod broadcast_engine;
pub mod broadcast_report;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_role;
pub mod connection_state;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod metrics_timer;
pub mod producer_connection;
pub mod producer_registry;
pub mod relay_state;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscriber_connection;
pub mod subscriber_handle;
pub mod subscriber_registry;

pub use broadcast_engine::BroadcastEngine;
pub use broadcast_report::BroadcastReport;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_role::ConnectionRole;
pub use connection_state::{ConnectionState, SharedConnectionState};
pub use error::{Result, WsError};
pub use frame::Frame;
pub use metrics::Metrics;
pub use metrics_timer::MetricsTimer;
pub use producer_connection::ProducerConnection;
pub use producer_registry::{ProducerLease, ProducerRegistry};
pub use relay_state::{RelayState, producer_handler, subscriber_handler};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscriber_connection::SubscriberConnection;
pub use subscriber_handle::SubscriberHandle;
pub use subscriber_registry::SubscriberRegistry;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;

use tracing::info_span;

/// Create a tracing span for one relay connection.
/// All log entries within the connection task will include these fields.
pub fn create_connection_span(
    role: ConnectionRole,
    connection_id: ConnectionId,
    remote_addr: Option<SocketAddr>,
) -> tracing::Span {
    let remote = remote_addr
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| String::from("unknown"));

    info_span!(
        "relay_connection",
        role = %role,
        connection_id = %connection_id,
        remote = %remote,
    )
}
