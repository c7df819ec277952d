// Configuration module entry point
// Loads the optional config.toml on top of built-in defaults

mod types;

use std::net::SocketAddr;

pub use types::{CompressionConfig, Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error: every key has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from the default `config.toml`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.backlog", 1024)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 60)?
            .set_default("compression.enabled", true)?
            .set_default("compression.level", 6)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_toml(toml: &str) -> Config {
        Config::with_defaults(config::Config::builder())
            .unwrap()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.compression.enabled);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8080".parse().unwrap()
        );
    }

    #[test]
    fn test_file_overrides_defaults() {
        let cfg = load_toml(
            r#"
            [server]
            port = 3000
            workers = 2

            [compression]
            enabled = false
            "#,
        );
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.workers, Some(2));
        assert!(!cfg.compression.enabled);
        assert_eq!(cfg.compression.level, 6);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_invalid_address() {
        let cfg = load_toml(
            r#"
            [server]
            host = "not an address"
            "#,
        );
        assert!(cfg.get_socket_addr().is_err());
    }
}
