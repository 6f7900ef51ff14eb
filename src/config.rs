//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Restaurant account the CLI operates on
    #[serde(default)]
    pub account_id: Option<String>,

    /// Bearer token; prefer `DINEDESK_TOKEN` over storing it here
    #[serde(default)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            account_id: None,
            token: None,
        }
    }
}

/// Poll intervals in seconds; 0 disables polling for that view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_orders_secs")]
    pub orders_secs: u64,

    #[serde(default = "default_dashboard_secs")]
    pub dashboard_secs: u64,

    #[serde(default = "default_order_alerts_secs")]
    pub order_alerts_secs: u64,

    #[serde(default = "default_bookings_secs")]
    pub bookings_secs: u64,
}

fn default_orders_secs() -> u64 {
    10
}

fn default_dashboard_secs() -> u64 {
    30
}

fn default_order_alerts_secs() -> u64 {
    15
}

fn default_bookings_secs() -> u64 {
    60
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            orders_secs: default_orders_secs(),
            dashboard_secs: default_dashboard_secs(),
            order_alerts_secs: default_order_alerts_secs(),
            bookings_secs: default_bookings_secs(),
        }
    }
}

/// New-order chime settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            sound_enabled: default_sound_enabled(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("dinedesk").join("config.toml")),
            Some(PathBuf::from("./dinedesk.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply `DINEDESK_*` overrides from any variable source
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("DINEDESK_API_URL") {
            self.api.base_url = url;
        }
        if let Some(account) = var("DINEDESK_ACCOUNT_ID") {
            self.api.account_id = Some(account);
        }
        if let Some(token) = var("DINEDESK_TOKEN") {
            self.api.token = Some(token);
        }

        if let Some(sound) = var("DINEDESK_SOUND") {
            match sound.to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => self.notifications.sound_enabled = true,
                "0" | "false" | "off" | "no" => self.notifications.sound_enabled = false,
                other => tracing::warn!("Ignoring DINEDESK_SOUND={:?}", other),
            }
        }

        if let Some(level) = var("DINEDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("DINEDESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# DineDesk Configuration
#
# Environment variables override these settings:
# - DINEDESK_API_URL
# - DINEDESK_ACCOUNT_ID
# - DINEDESK_TOKEN
# - DINEDESK_SOUND
# - DINEDESK_LOG_LEVEL
# - DINEDESK_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:3000/api"

# Request timeout in seconds
request_timeout_secs = 30

# Restaurant account to operate on
# account_id = ""

[polling]
# Seconds between refreshes; 0 disables polling
orders_secs = 10
dashboard_secs = 30
order_alerts_secs = 15
bookings_secs = 60

[notifications]
# Play a chime when a new pending order arrives
sound_enabled = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.polling, PollingConfig::default());
        assert!(config.notifications.sound_enabled);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\naccount_id = \"acc_42\"\n\n[polling]\norders_secs = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.account_id.as_deref(), Some("acc_42"));
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.polling.orders_secs, 5);
        assert_eq!(config.polling.bookings_secs, 60);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[api\nbase_url = 3").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DINEDESK_API_URL", "https://api.dinedesk.test"),
            ("DINEDESK_ACCOUNT_ID", "acc_1"),
            ("DINEDESK_SOUND", "off"),
            ("DINEDESK_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "https://api.dinedesk.test");
        assert_eq!(config.api.account_id.as_deref(), Some("acc_1"));
        assert!(!config.notifications.sound_enabled);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
