//! Configuration management for the relay chat server
//!
//! Loads settings from an optional `config.toml` with environment overrides,
//! falling back to defaults (port 2024 on all interfaces) when no file exists.

use config::{Config, Environment, File};
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    /// IP address to bind the listening socket
    pub bind_address: String,

    /// Port for the chat service
    pub port: u16,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 2024,
        }
    }
}

impl ChatConfig {
    /// Load configuration from config.toml (if present) with `RELAY_CHAT_*`
    /// environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("RELAY_CHAT"))
            .build()?;

        let config: ChatConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Get bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("Port cannot be 0".into()));
        }

        if self.bind_address.is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
