use relay_config::DEFAULT_MAX_SUBSCRIBERS;

/// Configuration for connection limits
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum concurrently registered subscribers
    pub max_subscribers: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_subscribers: DEFAULT_MAX_SUBSCRIBERS,
        }
    }
}
