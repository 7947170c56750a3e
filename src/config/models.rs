//! Configuration data structures for the gemini-webchat handler.
//!
//! This module defines the schema for the adapter settings: remote client
//! initialization, chat behavior policies, on-disk cache location,
//! dependency installation, and logging.

use serde::{Deserialize, Serialize};

/// The root configuration object for the handler.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdapterConfig {
    /// Remote web client initialization settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Chat behavior policies (model, gem handling, file filtering).
    #[serde(default)]
    pub chat: ChatConfig,

    /// Session metadata cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Dependency installation settings.
    #[serde(default)]
    pub install: InstallConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings passed to the remote web client on initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Client initialization timeout in seconds.
    /// Default: `180`
    #[serde(default = "default_init_timeout")]
    pub init_timeout_seconds: u64,

    /// Whether the client should close idle connections automatically.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub auto_close: bool,

    /// Idle delay before auto-close, in seconds.
    /// Default: `300`
    #[serde(default = "default_close_delay")]
    pub close_delay_seconds: u64,

    /// Whether the client should refresh its browser cookies automatically.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
}

/// How an existing gem is treated when the system prompt may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemPolicy {
    /// Rewrite the gem's prompt text to the current system prompt.
    Update,
    /// Keep the existing gem untouched; the current system prompt is ignored.
    Reuse,
}

/// Settings governing chat behavior per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Wire identifier of the model to chat with.
    /// Default: `gemini-2.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Policy applied when the named gem already exists remotely.
    /// Default: `update`
    #[serde(default = "default_gem_policy")]
    pub gem_policy: GemPolicy,

    /// Whether extracted file references must exist on disk to be sent.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub require_existing_files: bool,
}

/// Settings for the on-disk session cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Path of the JSON cache file mapping conversation UUIDs to session
    /// metadata.
    /// Default: `<data dir>/gemini-webchat/sessions.json`
    #[serde(default = "default_cache_path")]
    pub path: String,
}

/// Settings for installing the external client packages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Directory the packages are installed into (`pip --target`).
    /// Default: `<data dir>/gemini-webchat/packages`
    #[serde(default = "default_package_dir")]
    pub package_dir: String,

    /// Whether to install pinned package versions.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub pinned: bool,
}

/// Settings for handler logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            init_timeout_seconds: default_init_timeout(),
            auto_close: true,
            close_delay_seconds: default_close_delay(),
            auto_refresh: true,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            gem_policy: default_gem_policy(),
            require_existing_files: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            package_dir: default_package_dir(),
            pinned: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_init_timeout() -> u64 {
    180
}

fn default_close_delay() -> u64 {
    300 // 5 minutes
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gem_policy() -> GemPolicy {
    GemPolicy::Update
}

fn plugin_data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("gemini-webchat")
}

fn default_cache_path() -> String {
    plugin_data_dir()
        .join("sessions.json")
        .to_string_lossy()
        .to_string()
}

fn default_package_dir() -> String {
    plugin_data_dir()
        .join("packages")
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
