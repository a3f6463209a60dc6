mod config;
mod error;
mod http_config;
mod log_level;
mod logging_config;
mod producer_config;
mod producer_policy;
mod server_config;
mod subscriber_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use http_config::HttpConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use producer_config::ProducerConfig;
pub use producer_policy::ProducerPolicy;
pub use server_config::ServerConfig;
pub use subscriber_config::SubscriberConfig;

pub const CONFIG_DIR_ENV: &str = "RELAY_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".relay";
pub const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PRODUCER_PORT: u16 = 8080;
pub const DEFAULT_SUBSCRIBER_PORT: u16 = 8081;
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_PAGE: &str = "client.html";

/// Ports below this need privileges; 0 is accepted as "OS picks".
pub const MIN_PORT: u16 = 1024;

pub const MIN_MAX_SUBSCRIBERS: usize = 1;
pub const MAX_MAX_SUBSCRIBERS: usize = 100_000;
pub const DEFAULT_MAX_SUBSCRIBERS: usize = 1000;

pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10_000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 32;

pub const MIN_MAX_FRAME_BYTES: usize = 1024;
pub const MAX_MAX_FRAME_BYTES: usize = 256 * 1024 * 1024;
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
