use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_MAX_SUBSCRIBERS, MAX_MAX_SUBSCRIBERS,
    MIN_MAX_SUBSCRIBERS, MIN_PORT,
};

use serde::Deserialize;

/// Settings shared by all three listeners.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface every listener binds to
    pub host: String,
    /// Maximum concurrently registered subscribers
    pub max_subscribers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            max_subscribers: DEFAULT_MAX_SUBSCRIBERS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::config("server.host must not be empty"));
        }

        if self.max_subscribers < MIN_MAX_SUBSCRIBERS || self.max_subscribers > MAX_MAX_SUBSCRIBERS
        {
            return Err(ConfigError::config(format!(
                "server.max_subscribers must be {}-{}, got {}",
                MIN_MAX_SUBSCRIBERS, MAX_MAX_SUBSCRIBERS, self.max_subscribers
            )));
        }

        Ok(())
    }
}

/// Port 0 means "auto-assign"; any other port must be >= MIN_PORT.
pub(crate) fn validate_port(field: &str, port: u16) -> ConfigErrorResult<()> {
    if port != 0 && port < MIN_PORT {
        return Err(ConfigError::port(format!(
            "{field} must be 0 (auto) or >= {MIN_PORT}, got {port}"
        )));
    }
    Ok(())
}
