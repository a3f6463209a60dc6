use crate::server_config::validate_port;
use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_SEND_BUFFER_SIZE, DEFAULT_SUBSCRIBER_PORT,
    MAX_SEND_BUFFER_SIZE, MIN_SEND_BUFFER_SIZE,
};

use serde::Deserialize;

/// Downstream (viewer) endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SubscriberConfig {
    pub port: u16,
    /// Frames queued per subscriber before it is dropped as too slow
    pub send_buffer_size: usize,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SUBSCRIBER_PORT,
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
        }
    }
}

impl SubscriberConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_port("subscriber.port", self.port)?;

        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "subscriber.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        Ok(())
    }
}
