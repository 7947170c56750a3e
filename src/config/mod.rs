// Configuration module

mod models;

pub use models::*;

use crate::error::Result;
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AdapterConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&Self::default_config_path()).required(false))
            // Override with environment variables (prefix: GEMINI_WEBCHAT_)
            .add_source(Environment::with_prefix("GEMINI_WEBCHAT").separator("_"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    fn default_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gemini-webchat")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.init_timeout_seconds, 180);
        assert!(config.auto_close);
        assert_eq!(config.close_delay_seconds, 300);
        assert!(config.auto_refresh);
    }

    #[test]
    fn test_chat_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.gem_policy, GemPolicy::Update);
        assert!(config.require_existing_files);
    }

    #[test]
    fn test_gem_policy_roundtrip() {
        let json = serde_json::to_string(&GemPolicy::Reuse).unwrap();
        assert_eq!(json, "\"reuse\"");
        let back: GemPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GemPolicy::Reuse);
    }
}
