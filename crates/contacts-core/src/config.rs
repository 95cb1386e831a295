//! Configuration types for the contact book
//!
//! This module defines all configuration structures used throughout the workspace.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main contact book configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Client settings
    #[serde(default)]
    pub client: ClientConfig,
}

impl ContactsConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.server.validate()?;
        self.store.validate()?;
        self.client.validate()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix the contacts routes are mounted under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.host.is_empty() {
            return Err(crate::Error::config("Server host cannot be empty"));
        }
        if self.port == 0 {
            return Err(crate::Error::config("Server port must be > 0"));
        }
        if !self.api_prefix.starts_with('/') || self.api_prefix.ends_with('/') {
            return Err(crate::Error::config(format!(
                "API prefix must start with '/' and not end with one. Got: {}",
                self.api_prefix
            )));
        }
        Ok(())
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// SQLite file store
    Sqlite {
        /// Path to the database file
        path: String,
    },

    /// In-memory store (not persistent)
    Memory,
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::Sqlite { path } if path.is_empty() => {
                Err(crate::Error::config("SQLite store path cannot be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Get the store type name
    pub fn type_name(&self) -> &str {
        match self {
            StoreConfig::Sqlite { .. } => "sqlite",
            StoreConfig::Memory => "memory",
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite {
            path: default_store_path(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, without the `/contacts` segment
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quiet period after the last search keystroke before fetching (milliseconds)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Timeout for a single API request (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Capacity of the user notice channel
    #[serde(default = "default_notice_channel_capacity")]
    pub notice_channel_capacity: usize,
}

impl ClientConfig {
    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(crate::Error::config(format!(
                "API base URL must use HTTP or HTTPS scheme. Got: {}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(crate::Error::config("Request timeout must be > 0"));
        }
        if self.notice_channel_capacity == 0 {
            return Err(crate::Error::config("Notice channel capacity must be > 0"));
        }
        Ok(())
    }

    /// Debounce window as a Duration
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            notice_channel_capacity: default_notice_channel_capacity(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_store_path() -> String {
    "./contacts.db".to_string()
}

fn default_api_base_url() -> String {
    "http://localhost:4000/api".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_notice_channel_capacity() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ContactsConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.client.search_debounce(), Duration::from_millis(300));
        assert_eq!(config.store.type_name(), "sqlite");
    }

    #[test]
    fn test_store_config_is_tagged() {
        let store: StoreConfig = serde_json::from_str(r#"{"type":"memory"}"#).unwrap();
        assert_eq!(store, StoreConfig::Memory);

        let store: StoreConfig =
            serde_json::from_str(r#"{"type":"sqlite","path":"/tmp/c.db"}"#).unwrap();
        assert_eq!(
            store,
            StoreConfig::Sqlite {
                path: "/tmp/c.db".to_string()
            }
        );
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ContactsConfig =
            serde_json::from_str(r#"{"server":{"port":8080}}"#).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.client.api_base_url, "http://localhost:4000/api");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut server = ServerConfig::default();
        server.api_prefix = "api/".to_string();
        assert!(server.validate().is_err());

        let mut client = ClientConfig::default();
        client.api_base_url = "localhost:4000".to_string();
        assert!(client.validate().is_err());
    }
}
