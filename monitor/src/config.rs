//! # Config
//!
//! Define and implement config options for module

use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;
use std::time::Duration;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// host of the neuroevolution gRPC server
    pub server_host_grpc: String,
    /// port of the neuroevolution gRPC server
    pub server_port_grpc: u16,
    /// seconds to wait between two status requests
    pub poll_interval_secs: u64,
    /// path to log configuration YAML file
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(Config Default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            server_host_grpc: String::from("127.0.0.1"),
            server_port_grpc: 8080,
            poll_interval_secs: 15,
            log_config: String::from("log4rs.yaml"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::new();

        config::Config::builder()
            .set_default("server_host_grpc", default_config.server_host_grpc)?
            .set_default("server_port_grpc", default_config.server_port_grpc)?
            .set_default("poll_interval_secs", default_config.poll_interval_secs)?
            .set_default("log_config", default_config.log_config)?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Delay between two status requests
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_default() {
        let config = Config::default();

        assert_eq!(config.server_host_grpc, String::from("127.0.0.1"));
        assert_eq!(config.server_port_grpc, 8080);
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.poll_interval(), Duration::from_secs(15));
        assert_eq!(config.log_config, String::from("log4rs.yaml"));
    }

    #[test]
    fn test_config_from_env() {
        std::env::set_var("SERVER_HOST_GRPC", "test_host_grpc");
        std::env::set_var("SERVER_PORT_GRPC", "12345");
        std::env::set_var("POLL_INTERVAL_SECS", "2");
        std::env::set_var("LOG_CONFIG", "config_file.yaml");

        let config = Config::try_from_env();
        assert!(config.is_ok());
        let config = config.unwrap();

        assert_eq!(config.server_host_grpc, String::from("test_host_grpc"));
        assert_eq!(config.server_port_grpc, 12345);
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.log_config, String::from("config_file.yaml"));

        for var in [
            "SERVER_HOST_GRPC",
            "SERVER_PORT_GRPC",
            "POLL_INTERVAL_SECS",
            "LOG_CONFIG",
        ] {
            std::env::remove_var(var);
        }
    }
}
