use crate::server_config::validate_port;
use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_FRAME_BYTES, DEFAULT_PRODUCER_PORT,
    MAX_MAX_FRAME_BYTES, MIN_MAX_FRAME_BYTES, ProducerPolicy,
};

use serde::Deserialize;

/// Upstream (camera) endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub port: u16,
    pub policy: ProducerPolicy,
    /// Largest inbound message accepted from a producer
    pub max_frame_bytes: usize,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PRODUCER_PORT,
            policy: ProducerPolicy::default(),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl ProducerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_port("producer.port", self.port)?;

        if self.max_frame_bytes < MIN_MAX_FRAME_BYTES || self.max_frame_bytes > MAX_MAX_FRAME_BYTES
        {
            return Err(ConfigError::config(format!(
                "producer.max_frame_bytes must be {}-{}, got {}",
                MIN_MAX_FRAME_BYTES, MAX_MAX_FRAME_BYTES, self.max_frame_bytes
            )));
        }

        Ok(())
    }
}
