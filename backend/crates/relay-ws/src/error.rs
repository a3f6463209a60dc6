use crate::ConnectionId;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Send buffer full for subscriber {connection_id}, client too slow {location}")]
    SendBufferFull {
        connection_id: ConnectionId,
        location: ErrorLocation,
    },

    #[error("Send queue closed for subscriber {connection_id} {location}")]
    SendQueueClosed {
        connection_id: ConnectionId,
        location: ErrorLocation,
    },

    #[error("Subscriber limit exceeded: {current} subscribers (max: {max}) {location}")]
    SubscriberLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl WsError {
    /// Short machine-readable label used for metrics and close reasons
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::SendBufferFull { .. } => "SLOW_CLIENT",
            Self::SendQueueClosed { .. } => "QUEUE_CLOSED",
            Self::SubscriberLimitExceeded { .. } => "SUBSCRIBER_LIMIT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
