use crate::server_config::validate_port;
use crate::{ConfigError, ConfigErrorResult, DEFAULT_HTTP_PORT, DEFAULT_PAGE};

use serde::Deserialize;

/// Static viewer page listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    /// HTML file served at `/`, relative to the config directory unless absolute
    pub page: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            page: String::from(DEFAULT_PAGE),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_port("http.port", self.port)?;

        if self.page.trim().is_empty() {
            return Err(ConfigError::config("http.page must not be empty"));
        }

        Ok(())
    }
}
