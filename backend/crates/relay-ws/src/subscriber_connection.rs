use crate::{
    ConnectionInfo, ConnectionRole, Frame, Metrics, Result as WsErrorResult,
    SharedConnectionState, ShutdownGuard, SubscriberRegistry, WsError,
};

use std::panic::Location;

use axum::extract::ws::{CloseFrame, Message, WebSocket, close_code};
use error_location::ErrorLocation;
use futures::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// How long a close frame may take before the socket is dropped anyway
pub(crate) const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Why the writer task stopped
#[derive(Debug)]
pub(crate) enum WriterExit {
    /// Relay gave up on the subscriber (queue overflow)
    Dropped,
    Shutdown,
    SendFailed(axum::Error),
}

/// Manages a single subscriber connection.
///
/// Owns only the receiving half of the frame queue; the registry holds the
/// sending half, so unregistering the subscriber closes the queue.
pub struct SubscriberConnection {
    info: ConnectionInfo,
    state: SharedConnectionState,
    registry: SubscriberRegistry,
    metrics: Metrics,
}

impl SubscriberConnection {
    pub fn new(
        info: ConnectionInfo,
        state: SharedConnectionState,
        registry: SubscriberRegistry,
        metrics: Metrics,
    ) -> Self {
        Self {
            info,
            state,
            registry,
            metrics,
        }
    }

    /// Handle the subscriber connection lifecycle
    pub async fn handle(
        self,
        socket: WebSocket,
        frames: mpsc::Receiver<Frame>,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let connection_id = self.info.connection_id;
        log::info!(
            "Subscriber {} connected from {}",
            connection_id,
            self.info.remote()
        );

        self.metrics
            .connection_established(ConnectionRole::Subscriber);

        let (ws_sender, mut ws_receiver) = socket.split();

        // Writer: drains the queue into the socket
        let mut send_task = tokio::spawn(write_frames(
            ws_sender,
            frames,
            self.state.clone(),
            shutdown_guard,
            self.metrics.clone(),
        ));

        if !self.state.mark_open() {
            log::warn!(
                "Subscriber {} left Connecting before the socket was ready",
                connection_id
            );
        }

        let result = loop {
            tokio::select! {
                // Subscribers never send application data; read only to notice close
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("Subscriber {} closed by client", connection_id);
                            break Ok(());
                        }
                        Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {}
                        Some(Ok(other)) => {
                            log::debug!(
                                "Ignoring {} inbound message from subscriber {}",
                                Frame::from_message(other).map(|f| f.kind()).unwrap_or("control"),
                                connection_id
                            );
                        }
                        Some(Err(e)) => {
                            log::error!("Subscriber {} transport error: {}", connection_id, e);
                            self.metrics.error_occurred("subscriber_transport");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }

                exit = &mut send_task => {
                    match exit {
                        Ok(WriterExit::Dropped) => {
                            log::warn!("Subscriber {} dropped by relay (too slow)", connection_id);
                            break Err(WsError::ConnectionClosed {
                                reason: String::from("dropped by relay"),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        Ok(WriterExit::Shutdown) => {
                            log::info!("Shutting down subscriber {} gracefully", connection_id);
                            break Ok(());
                        }
                        Ok(WriterExit::SendFailed(e)) => {
                            log::error!("Send to subscriber {} failed: {}", connection_id, e);
                            self.metrics.error_occurred("subscriber_send");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("send failed: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        Err(e) => {
                            break Err(WsError::Internal {
                                message: format!("writer task failed: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                    }
                }
            }
        };

        // Cleanup; the writer goes first so it cannot react to Closed
        send_task.abort();
        self.state.mark_closed();
        self.registry.unregister(connection_id).await;

        self.metrics.connection_closed(
            ConnectionRole::Subscriber,
            if result.is_ok() { "normal" } else { "error" },
        );

        log::info!(
            "Subscriber {} ({}) disconnected after {}s",
            connection_id,
            self.info.remote(),
            self.info.connected_for().num_seconds()
        );

        result
    }
}

pub(crate) async fn write_frames<S>(
    mut ws_sender: S,
    mut frames: mpsc::Receiver<Frame>,
    state: SharedConnectionState,
    mut shutdown_guard: ShutdownGuard,
    metrics: Metrics,
) -> WriterExit
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    loop {
        let frame = tokio::select! {
            biased;

            _ = shutdown_guard.wait() => return shut_down(&mut ws_sender, &state).await,

            _ = state.closing() => return dropped(&mut ws_sender).await,

            frame = frames.recv() => match frame {
                Some(frame) => frame,
                None => return dropped(&mut ws_sender).await,
            },
        };

        let len = frame.len();

        // A peer that stops reading parks the send; being dropped or shut down
        // must still end the writer.
        tokio::select! {
            biased;

            _ = shutdown_guard.wait() => return shut_down(&mut ws_sender, &state).await,

            _ = state.closing() => return dropped(&mut ws_sender).await,

            result = ws_sender.send(frame.into()) => {
                if let Err(e) = result {
                    return WriterExit::SendFailed(e);
                }
                metrics.frame_written(len);
            }
        }
    }
}

async fn shut_down<S>(ws_sender: &mut S, state: &SharedConnectionState) -> WriterExit
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    state.begin_closing();
    send_close(ws_sender, close_code::AWAY, "server shutting down").await;
    WriterExit::Shutdown
}

async fn dropped<S>(ws_sender: &mut S) -> WriterExit
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    send_close(ws_sender, close_code::AGAIN, "too slow").await;
    WriterExit::Dropped
}

/// Best effort: a stalled peer gets `CLOSE_TIMEOUT` to take the close frame.
async fn send_close<S>(ws_sender: &mut S, code: u16, reason: &'static str)
where
    S: Sink<Message, Error = axum::Error> + Unpin,
{
    let close = ws_sender.send(Message::Close(Some(CloseFrame {
        code,
        reason: reason.into(),
    })));

    match timeout(CLOSE_TIMEOUT, close).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::debug!("Close frame ({code}) not sent: {e}"),
        Err(_) => log::debug!("Close frame ({code}) timed out after {CLOSE_TIMEOUT:?}"),
    }
}
