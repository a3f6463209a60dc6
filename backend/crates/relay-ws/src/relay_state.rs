use crate::{
    BroadcastEngine, ConnectionConfig, ConnectionId, ConnectionInfo, ConnectionLimits,
    ConnectionRole, ConnectionState, Frame, Metrics, ProducerConnection, ProducerRegistry,
    SharedConnectionState, ShutdownCoordinator, SubscriberConnection, SubscriberHandle,
    SubscriberRegistry, create_connection_span,
};

use relay_config::{Config, ProducerPolicy};

use std::net::SocketAddr;

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::{Extensions, StatusCode},
    response::Response,
};
use log::{error, warn};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Process-wide relay service, built once at startup and handed to every router
#[derive(Clone)]
pub struct RelayState {
    pub subscribers: SubscriberRegistry,
    pub producers: ProducerRegistry,
    pub engine: BroadcastEngine,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

impl RelayState {
    pub fn new(
        config: ConnectionConfig,
        limits: ConnectionLimits,
        policy: ProducerPolicy,
        shutdown: ShutdownCoordinator,
    ) -> Self {
        let metrics = Metrics::new();
        let subscribers = SubscriberRegistry::new(limits);
        let engine = BroadcastEngine::new(subscribers.clone(), metrics.clone());

        Self {
            subscribers,
            producers: ProducerRegistry::new(policy),
            engine,
            metrics,
            shutdown,
            config,
        }
    }

    /// Build the relay from loaded configuration
    pub fn from_config(config: &Config, shutdown: ShutdownCoordinator) -> Self {
        Self::new(
            ConnectionConfig {
                send_buffer_size: config.subscriber.send_buffer_size,
                max_frame_bytes: config.producer.max_frame_bytes,
            },
            ConnectionLimits {
                max_subscribers: config.server.max_subscribers,
            },
            config.producer.policy,
            shutdown,
        )
    }
}

/// WebSocket upgrade handler for the producer listener
pub async fn producer_handler(
    State(state): State<RelayState>,
    extensions: Extensions,
    ws: WebSocketUpgrade,
) -> Response {
    let info = ConnectionInfo::new(ConnectionRole::Producer, remote_addr(&extensions));
    let max_frame_bytes = state.config.max_frame_bytes;

    ws.max_message_size(max_frame_bytes)
        .max_frame_size(max_frame_bytes)
        .on_upgrade(move |socket| handle_producer_socket(socket, info, state))
}

/// WebSocket upgrade handler for the subscriber listener
pub async fn subscriber_handler(
    State(state): State<RelayState>,
    extensions: Extensions,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let info = ConnectionInfo::new(ConnectionRole::Subscriber, remote_addr(&extensions));
    let connection_state = SharedConnectionState::new(ConnectionState::Connecting);
    let (tx, rx) = mpsc::channel::<Frame>(state.config.send_buffer_size);

    // Registered before the upgrade so the limit can be answered with 503;
    // broadcasts skip it until the socket task marks it Open.
    let handle = SubscriberHandle::new(info.clone(), connection_state.clone(), tx);
    let connection_id = state.subscribers.register(handle).await.map_err(|e| {
        warn!("Rejecting subscriber from {}: {}", info.remote(), e);
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let registry = state.subscribers.clone();

    Ok(ws
        .on_failed_upgrade(release_failed_upgrade(registry, connection_id))
        .on_upgrade(move |socket| {
            handle_subscriber_socket(socket, info, connection_state, rx, state)
        }))
}

async fn handle_producer_socket(socket: WebSocket, info: ConnectionInfo, state: RelayState) {
    let connection_id = info.connection_id;
    let span = create_connection_span(info.role, connection_id, info.remote_addr);

    async move {
        let lease = state.producers.register(info.clone()).await;
        let shutdown_guard = state.shutdown.subscribe_guard();

        let connection =
            ProducerConnection::new(info, state.engine.clone(), state.metrics.clone());
        let result = connection.handle(socket, lease, shutdown_guard).await;

        state.producers.unregister(connection_id).await;

        if let Err(e) = result {
            error!("Producer {connection_id} error: {e}");
        }
    }
    .instrument(span)
    .await
}

async fn handle_subscriber_socket(
    socket: WebSocket,
    info: ConnectionInfo,
    connection_state: SharedConnectionState,
    frames: mpsc::Receiver<Frame>,
    state: RelayState,
) {
    let connection_id = info.connection_id;
    let span = create_connection_span(info.role, connection_id, info.remote_addr);

    async move {
        let shutdown_guard = state.shutdown.subscribe_guard();

        let connection = SubscriberConnection::new(
            info,
            connection_state,
            state.subscribers.clone(),
            state.metrics.clone(),
        );

        // Unregisters itself on exit
        if let Err(e) = connection.handle(socket, frames, shutdown_guard).await {
            error!("Subscriber {connection_id} error: {e}");
        }
    }
    .instrument(span)
    .await
}

/// Frees the slot reserved for a subscriber whose upgrade never completed
pub(crate) fn release_failed_upgrade(
    registry: SubscriberRegistry,
    connection_id: ConnectionId,
) -> impl FnOnce(axum::Error) + Send + 'static {
    move |e| {
        warn!("Subscriber {connection_id} upgrade failed: {e}");
        tokio::spawn(async move {
            registry.unregister(connection_id).await;
        });
    }
}

fn remote_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}
