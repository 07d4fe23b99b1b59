//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the HTTP server.
///
/// Resolved in layers: built-in defaults, then an optional TOML file, then
/// environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// SQLite database path.
    database_url: String,

    /// Log filter used when `RUST_LOG` is not set.
    log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: "mastermind.db".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies `MASTERMIND_HOST`, `MASTERMIND_PORT` and `DATABASE_URL`.
    #[instrument(skip(self))]
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `var`.
    pub fn with_vars(
        mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = var("MASTERMIND_HOST") {
            self.host = host;
        }
        if let Some(port) = var("MASTERMIND_PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid MASTERMIND_PORT: '{}'", port)))?;
        }
        if let Some(url) = var("DATABASE_URL") {
            self.database_url = url;
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml("port = 8080\n").unwrap();
        assert_eq!(*config.port(), 8080);
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.database_url(), "mastermind.db");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(ServerConfig::from_toml("port = \"not a number\"").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::default()
            .with_vars(|key| match key {
                "MASTERMIND_PORT" => Some("4000".to_string()),
                "DATABASE_URL" => Some("/tmp/games.db".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(*config.port(), 4000);
        assert_eq!(config.database_url(), "/tmp/games.db");
        assert_eq!(config.host(), "127.0.0.1");
    }

    #[test]
    fn test_bad_env_port() {
        let result = ServerConfig::default().with_vars(|key| {
            (key == "MASTERMIND_PORT").then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = ServerConfig::default().with_overrides(
            Some("0.0.0.0".to_string()),
            Some(9000),
            None,
        );
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
