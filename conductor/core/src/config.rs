//! TOML Configuration File Support
//!
//! Centralized configuration loading for the chat client, with an optional
//! TOML file at `~/.config/gracewise/chat.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! endpoint_url = "http://127.0.0.1:8000/api/ask"
//! mock_mode = false
//! mock_latency_ms = 700
//! request_timeout_secs = 60
//! reply_fields = ["answer", "reply", "message"]
//! error_field = "error"
//!
//! [sidebar]
//! capacity = 10
//! label_chars = 50
//! ```
//!
//! # Environment Variables
//!
//! - `GRACEWISE_ENDPOINT_URL`: question endpoint (empty forces mock mode)
//! - `GRACEWISE_MOCK_MODE`: `1`/`true` forces canned replies
//! - `GRACEWISE_MOCK_LATENCY_MS`: simulated mock latency
//! - `GRACEWISE_REQUEST_TIMEOUT_SECS`: HTTP request timeout

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{BackendConfig, ReplyFields, DEFAULT_MOCK_LATENCY};
use crate::session::SessionConfig;
use crate::sidebar::{DEFAULT_LABEL_CHARS, DEFAULT_SUMMARY_CAPACITY};

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8000/api/ask";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Question endpoint URL
    pub endpoint_url: Option<String>,

    /// Force canned replies
    pub mock_mode: Option<bool>,

    /// Simulated mock latency in milliseconds
    pub mock_latency_ms: Option<u64>,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,

    /// Reply fields in priority order
    pub reply_fields: Option<Vec<String>>,

    /// Field carrying a server-reported error
    pub error_field: Option<String>,
}

/// Sidebar section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarToml {
    /// Number of conversation summaries kept
    pub capacity: Option<usize>,

    /// Label length before truncation
    pub label_chars: Option<usize>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatToml {
    /// `[backend]` section
    pub backend: BackendToml,
    /// `[sidebar]` section
    pub sidebar: SidebarToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved client configuration
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Question endpoint (blank forces mock mode)
    pub endpoint_url: Option<String>,
    /// Force canned replies
    pub mock_mode: bool,
    /// Simulated mock latency
    pub mock_latency: Duration,
    /// HTTP request timeout (None = client default)
    pub request_timeout: Option<Duration>,
    /// Reply fields in priority order
    pub reply_fields: Vec<String>,
    /// Field carrying a server-reported error
    pub error_field: Option<String>,
    /// Number of sidebar summaries kept
    pub sidebar_capacity: usize,
    /// Sidebar label length before truncation
    pub summary_label_chars: usize,
    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,
    source: ConfigSource,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint_url: Some(DEFAULT_ENDPOINT_URL.to_string()),
            mock_mode: false,
            mock_latency: DEFAULT_MOCK_LATENCY,
            request_timeout: None,
            reply_fields: vec![
                "answer".to_string(),
                "reply".to_string(),
                "message".to_string(),
            ],
            error_field: Some("error".to_string()),
            sidebar_capacity: DEFAULT_SUMMARY_CAPACITY,
            summary_label_chars: DEFAULT_LABEL_CHARS,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ChatConfig {
    /// Create a config with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the highest-priority values came from
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Reject values the client cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sidebar_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "sidebar capacity must be at least 1".to_string(),
            ));
        }
        if self.summary_label_chars == 0 {
            return Err(ConfigError::ValidationError(
                "sidebar label length must be at least 1".to_string(),
            ));
        }
        if self.reply_fields.iter().all(|f| f.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "at least one reply field is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Transport adapter settings
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            endpoint_url: self.endpoint_url.clone(),
            mock_mode: self.mock_mode,
            mock_latency: self.mock_latency,
            request_timeout: self.request_timeout,
            reply_fields: ReplyFields::new(
                self.reply_fields.iter().filter(|f| !f.trim().is_empty()).cloned(),
                self.error_field.as_deref().filter(|f| !f.trim().is_empty()),
            ),
        }
    }

    /// Session controller settings
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            summary_label_chars: self.summary_label_chars,
        }
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Default configuration file path
///
/// `$XDG_CONFIG_HOME/gracewise/chat.toml` (typically `~/.config/gracewise/chat.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("gracewise").join("chat.toml"))
}

/// Load configuration from the default path and the environment
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment
///
/// A missing file is not an error; defaults are used instead.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ChatConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with a custom environment lookup
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ChatConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ChatConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ChatToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

fn apply_toml_config(config: &mut ChatConfig, toml: &ChatToml) {
    let backend = &toml.backend;
    if let Some(ref url) = backend.endpoint_url {
        config.endpoint_url = Some(url.clone());
    }
    if let Some(mock) = backend.mock_mode {
        config.mock_mode = mock;
    }
    if let Some(ms) = backend.mock_latency_ms {
        config.mock_latency = Duration::from_millis(ms);
    }
    if let Some(secs) = backend.request_timeout_secs {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(ref fields) = backend.reply_fields {
        config.reply_fields.clone_from(fields);
    }
    if let Some(ref field) = backend.error_field {
        config.error_field = Some(field.clone());
    }

    if let Some(capacity) = toml.sidebar.capacity {
        config.sidebar_capacity = capacity;
    }
    if let Some(chars) = toml.sidebar.label_chars {
        config.summary_label_chars = chars;
    }
}

fn apply_env_config<F>(config: &mut ChatConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut from_env = false;

    if let Some(url) = env("GRACEWISE_ENDPOINT_URL") {
        config.endpoint_url = Some(url);
        from_env = true;
    }

    if let Some(v) = env("GRACEWISE_MOCK_MODE") {
        config.mock_mode = v == "1" || v.eq_ignore_ascii_case("true");
        from_env = true;
    }

    if let Some(ms) = env("GRACEWISE_MOCK_LATENCY_MS").and_then(|v| v.parse().ok()) {
        config.mock_latency = Duration::from_millis(ms);
        from_env = true;
    }

    if let Some(secs) = env("GRACEWISE_REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        config.request_timeout = Some(Duration::from_secs(secs));
        from_env = true;
    }

    if from_env {
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Highest-priority values, typically from command-line flags
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Question endpoint
    pub endpoint_url: Option<String>,
    /// Force canned replies
    pub mock_mode: Option<bool>,
    /// Simulated mock latency in milliseconds
    pub mock_latency_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint_url(mut self, url: String) -> Self {
        self.endpoint_url = Some(url);
        self
    }

    /// Override mock mode
    #[must_use]
    pub fn with_mock_mode(mut self, mock: bool) -> Self {
        self.mock_mode = Some(mock);
        self
    }

    /// Override mock latency
    #[must_use]
    pub fn with_mock_latency_ms(mut self, ms: u64) -> Self {
        self.mock_latency_ms = Some(ms);
        self
    }

    /// Whether any value is overridden
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoint_url.is_none() && self.mock_mode.is_none() && self.mock_latency_ms.is_none()
    }

    /// Apply overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut ChatConfig) {
        if self.is_empty() {
            return;
        }
        if let Some(ref url) = self.endpoint_url {
            config.endpoint_url = Some(url.clone());
        }
        if let Some(mock) = self.mock_mode {
            config.mock_mode = mock;
        }
        if let Some(ms) = self.mock_latency_ms {
            config.mock_latency = Duration::from_millis(ms);
        }
        config.source = ConfigSource::Cli;
    }
}
