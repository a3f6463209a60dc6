use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    HttpConfig, LoggingConfig, ProducerConfig, ServerConfig, SubscriberConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub producer: ProducerConfig,
    pub subscriber: SubscriberConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for RELAY_CONFIG_DIR env var, else use ./.relay/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RELAY_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: RELAY_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.producer.validate()?;
        self.subscriber.validate()?;
        self.http.validate()?;

        let ports = [
            ("producer.port", self.producer.port),
            ("subscriber.port", self.subscriber.port),
            ("http.port", self.http.port),
        ];
        for (i, (name_a, port_a)) in ports.iter().enumerate() {
            for (name_b, port_b) in &ports[i + 1..] {
                if *port_a != 0 && port_a == port_b {
                    return Err(ConfigError::port(format!(
                        "{name_a} and {name_b} must differ, both are {port_a}"
                    )));
                }
            }
        }

        if let Some(ref file) = self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file must not be empty when set"));
        }

        Ok(())
    }

    pub fn producer_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.producer.port)
    }

    pub fn subscriber_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.subscriber.port)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.http.port)
    }

    /// Absolute path of the viewer page.
    pub fn page_path(&self) -> ConfigErrorResult<PathBuf> {
        let page = Path::new(&self.http.page);
        if page.is_absolute() {
            return Ok(page.to_path_buf());
        }
        Ok(Self::config_dir()?.join(page))
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: host={} (max {} subscribers)",
            self.server.host, self.server.max_subscribers
        );
        info!(
            "  producer: port={} policy={} max_frame={}B",
            self.producer.port, self.producer.policy, self.producer.max_frame_bytes
        );
        info!(
            "  subscriber: port={} buffer={} frames",
            self.subscriber.port, self.subscriber.send_buffer_size
        );
        info!("  http: port={} page={}", self.http.port, self.http.page);
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RELAY_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse(
            "RELAY_SERVER_MAX_SUBSCRIBERS",
            &mut self.server.max_subscribers,
        );

        // Producer
        Self::apply_env_parse("RELAY_PRODUCER_PORT", &mut self.producer.port);
        Self::apply_env_parse("RELAY_PRODUCER_POLICY", &mut self.producer.policy);
        Self::apply_env_parse(
            "RELAY_PRODUCER_MAX_FRAME_BYTES",
            &mut self.producer.max_frame_bytes,
        );

        // Subscriber
        Self::apply_env_parse("RELAY_SUBSCRIBER_PORT", &mut self.subscriber.port);
        Self::apply_env_parse(
            "RELAY_SUBSCRIBER_SEND_BUFFER_SIZE",
            &mut self.subscriber.send_buffer_size,
        );

        // HTTP
        Self::apply_env_parse("RELAY_HTTP_PORT", &mut self.http.port);
        Self::apply_env_string("RELAY_HTTP_PAGE", &mut self.http.page);

        // Logging
        Self::apply_env_parse("RELAY_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RELAY_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RELAY_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
