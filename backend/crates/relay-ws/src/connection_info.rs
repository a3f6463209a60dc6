use crate::{ConnectionId, ConnectionRole};

use std::net::SocketAddr;

use chrono::{DateTime, TimeDelta, Utc};

/// Information about an accepted connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub role: ConnectionRole,
    /// Peer address, for diagnostics only
    pub remote_addr: Option<SocketAddr>,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionInfo {
    pub fn new(role: ConnectionRole, remote_addr: Option<SocketAddr>) -> Self {
        Self {
            connection_id: ConnectionId::new(),
            role,
            remote_addr,
            connected_at: Utc::now(),
        }
    }

    /// Remote address for log lines
    pub fn remote(&self) -> String {
        self.remote_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| String::from("unknown"))
    }

    pub fn connected_for(&self) -> TimeDelta {
        Utc::now().signed_duration_since(self.connected_at)
    }
}
