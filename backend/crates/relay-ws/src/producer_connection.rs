use crate::{
    BroadcastEngine, ConnectionInfo, ConnectionRole, Frame, Metrics, ProducerLease,
    Result as WsErrorResult, ShutdownGuard, WsError,
};

use std::panic::Location;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use error_location::ErrorLocation;

/// Manages a single producer connection: every data message becomes a frame
/// that is fanned out before the next message is read.
pub struct ProducerConnection {
    info: ConnectionInfo,
    engine: BroadcastEngine,
    metrics: Metrics,
}

impl ProducerConnection {
    pub fn new(info: ConnectionInfo, engine: BroadcastEngine, metrics: Metrics) -> Self {
        Self {
            info,
            engine,
            metrics,
        }
    }

    /// Handle the producer connection lifecycle
    pub async fn handle(
        self,
        mut socket: WebSocket,
        mut lease: ProducerLease,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let connection_id = self.info.connection_id;
        log::info!(
            "Producer {} connected from {}",
            connection_id,
            self.info.remote()
        );

        self.metrics.connection_established(ConnectionRole::Producer);

        let mut frames: u64 = 0;

        let result = loop {
            tokio::select! {
                msg = socket.recv() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Producer {} closed the connection", connection_id);
                            break Ok(());
                        }
                        Some(Ok(msg)) => {
                            if let Some(frame) = Frame::from_message(msg) {
                                frames += 1;
                                self.metrics.frame_received(frame.kind(), frame.len());
                                self.engine.broadcast(&frame).await;
                            }
                        }
                        Some(Err(e)) => {
                            log::error!("Producer {} transport error: {}", connection_id, e);
                            self.metrics.error_occurred("producer_transport");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                _ = lease.superseded() => {
                    log::info!("Producer {} superseded by a newer producer", connection_id);
                    self.metrics.producer_superseded();
                    send_close(&mut socket, close_code::NORMAL, "superseded").await;
                    break Ok(());
                }

                _ = shutdown_guard.wait() => {
                    log::info!("Shutting down producer {} gracefully", connection_id);
                    send_close(&mut socket, close_code::AWAY, "server shutting down").await;
                    break Ok(());
                }
            }
        };

        self.metrics.connection_closed(
            ConnectionRole::Producer,
            if result.is_ok() { "normal" } else { "error" },
        );

        log::info!(
            "Producer {} ({}) disconnected after {} frames in {}s",
            connection_id,
            self.info.remote(),
            frames,
            self.info.connected_for().num_seconds()
        );

        result
    }
}

async fn send_close(socket: &mut WebSocket, code: u16, reason: &'static str) {
    let frame = CloseFrame {
        code,
        reason: reason.into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}
