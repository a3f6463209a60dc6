use relay_config::{DEFAULT_MAX_FRAME_BYTES, DEFAULT_SEND_BUFFER_SIZE};

/// Configuration for relay WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Per-subscriber queue length (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Largest message accepted from a producer
    pub max_frame_bytes: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}
