//! Service configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Top-level configuration, read from a TOML file.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct DuelConfig {
    /// HTTP listener settings.
    #[serde(default)]
    server: ServerConfig,

    /// Lobby rules.
    #[serde(default)]
    lobby: LobbyConfig,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,
}

/// Rules applied by the lobby.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Longest accepted player name, in characters.
    #[serde(default = "default_max_name_len")]
    max_name_len: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_name_len() -> usize {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
        }
    }
}

impl ServerConfig {
    /// Replaces host and/or port.
    pub fn override_with(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// Address string for binding, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DuelConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(
            addr = %config.server.bind_addr(),
            max_name_len = config.lobby.max_name_len,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file if it exists, otherwise starts from defaults, then
    /// applies the `PORT` environment variable.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_env(std::env::var("PORT").ok())?;
        Ok(config)
    }

    /// Applies a `PORT` value taken from the environment.
    pub fn apply_env(&mut self, port: Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = port {
            let port = raw.trim().parse::<u16>().map_err(|e| {
                warn!(value = %raw, "Ignoring unparsable PORT");
                ConfigError::new(format!("Invalid PORT value '{}': {}", raw, e))
            })?;
            debug!(port, "PORT overrides configured port");
            self.server.port = port;
        }
        Ok(())
    }

    /// Mutable access for command-line overrides.
    pub fn server_mut(&mut self) -> &mut ServerConfig {
        &mut self.server
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
