use crate::{
    ConnectionId, ConnectionInfo, Frame, Result as WsErrorResult, SharedConnectionState, WsError,
};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Registry-side view of one subscriber: its identity, state and the sending
/// half of its bounded frame queue.
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    info: ConnectionInfo,
    state: SharedConnectionState,
    sender: mpsc::Sender<Frame>,
}

impl SubscriberHandle {
    pub fn new(
        info: ConnectionInfo,
        state: SharedConnectionState,
        sender: mpsc::Sender<Frame>,
    ) -> Self {
        Self {
            info,
            state,
            sender,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.info.connection_id
    }

    pub fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    pub fn state(&self) -> &SharedConnectionState {
        &self.state
    }

    /// Queue a frame without waiting.
    #[track_caller]
    pub fn try_send(&self, frame: Frame) -> WsErrorResult<()> {
        self.sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => WsError::SendBufferFull {
                connection_id: self.info.connection_id,
                location: ErrorLocation::from(Location::caller()),
            },
            TrySendError::Closed(_) => WsError::SendQueueClosed {
                connection_id: self.info.connection_id,
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }
}
