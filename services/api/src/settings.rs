//! Service settings loaded from the environment

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Where documents are stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
}

impl ServerConfig {
    /// Load configuration from `APP_*` environment variables
    ///
    /// # Environment Variables
    /// - `APP_HOST`: Bind address (default: 0.0.0.0)
    /// - `APP_PORT`: Listening port (default: 3000)
    /// - `APP_STORAGE_BACKEND`: `postgres` or `memory` (default: postgres)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("storage_backend", "postgres")?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        unsafe {
            std::env::remove_var("APP_HOST");
            std::env::remove_var("APP_PORT");
            std::env::remove_var("APP_STORAGE_BACKEND");
        }

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        unsafe {
            std::env::set_var("APP_PORT", "8080");
            std::env::set_var("APP_STORAGE_BACKEND", "memory");
        }

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage_backend, StorageBackend::Memory);

        unsafe {
            std::env::remove_var("APP_PORT");
            std::env::remove_var("APP_STORAGE_BACKEND");
        }
    }
}
