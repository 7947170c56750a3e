// Outbound port to the unofficial Gemini web client
//
// All protocol-level work (browser cookie auth, wire format, streaming)
// lives behind these traits; this crate never implements it.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::ModelEntry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Options applied when the remote client initializes.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub timeout: Duration,
    pub auto_close: bool,
    pub close_delay: Duration,
    pub auto_refresh: bool,
}

impl From<&ClientConfig> for InitOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.init_timeout_seconds),
            auto_close: config.auto_close,
            close_delay: Duration::from_secs(config.close_delay_seconds),
            auto_refresh: config.auto_refresh,
        }
    }
}

/// A named system-prompt profile persisted on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gem {
    pub id: String,
    pub name: String,
    pub prompt: String,
}

/// Parameters for starting a chat session.
#[derive(Debug, Clone)]
pub struct ChatParams {
    /// Wire identifier of the model to chat with.
    pub model: String,
    /// Gem the session runs under.
    pub gem: Gem,
    /// Opaque checkpoint from a prior session, if resuming.
    pub metadata: Option<Value>,
}

/// The response to a sent message.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
}

/// Handle to the remote web client for the duration of one invocation.
#[async_trait]
pub trait GeminiClient: Send {
    /// Authenticate (via browser cookies) and open the client.
    async fn init(&mut self, options: &InitOptions) -> Result<()>;

    /// Fetch the named gems stored on the remote service.
    async fn fetch_gems(&mut self) -> Result<Vec<Gem>>;

    /// Create a gem with the given name and prompt text.
    async fn create_gem(&mut self, name: &str, prompt: &str) -> Result<Gem>;

    /// Rewrite an existing gem's name and prompt text.
    async fn update_gem(&mut self, gem: &Gem, name: &str, prompt: &str) -> Result<Gem>;

    /// Start a chat session, optionally resuming a prior checkpoint.
    async fn start_chat(&mut self, params: ChatParams) -> Result<Box<dyn ChatSession>>;
}

/// An open chat session on the remote service.
#[async_trait]
pub trait ChatSession: Send {
    /// Send text plus local file attachments; resolves when the full
    /// response has arrived.
    async fn send_message(&mut self, text: &str, files: &[PathBuf]) -> Result<ChatResponse>;

    /// Checkpoint for resuming this session later. Updated by the remote
    /// client after each send; stored verbatim in the cache.
    fn metadata(&self) -> Option<Value>;
}

/// Constructs client handles and reports what the installed client
/// library supports.
pub trait ClientFactory: Send + Sync {
    /// A fresh, uninitialized client handle.
    fn connect(&self) -> Result<Box<dyn GeminiClient>>;

    /// Model identifiers the installed client library knows about, as
    /// (display name, wire identifier) pairs. May fail when the library
    /// is not installed yet; callers fall back to the defaults.
    fn supported_models(&self) -> Result<Vec<ModelEntry>>;
}
