// The session-cache-backed chat adapter and the handler contract it
// implements

mod registry;

pub use registry::HandlerRegistry;

use crate::cache::SessionCache;
use crate::client::{ChatParams, ClientFactory, InitOptions};
use crate::config::AdapterConfig;
use crate::error::{HandlerError, Result};
use crate::files;
use crate::gems;
use crate::history::{self, HistoryEntry};
use crate::install::DependencyProvider;
use crate::models::{self, ModelEntry};
use crate::{GEM_NAME, HANDLER_KEY};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sent in place of an empty prompt; the remote service rejects empty text.
pub const EMPTY_PROMPT_PLACEHOLDER: &str = "(no prompt was provided)";

/// The capability set a host expects from any LLM backend.
///
/// `on_update` exists for backends that stream; this crate's backend is
/// fully blocking and invokes the callback exactly once, with the
/// complete response text, just before returning it.
pub trait LlmHandler: Send + Sync {
    /// Identifier the host registry selects this handler by.
    fn key(&self) -> &str;

    /// Whether the external dependencies are ready to use.
    fn is_installed(&self) -> bool;

    /// Install the external dependencies.
    fn install(&self) -> Result<()>;

    /// Run one prompt to completion and return the response text.
    fn generate_text(
        &self,
        prompt: &str,
        history: &[HistoryEntry],
        system_prompt: &[String],
        on_update: &dyn Fn(&str),
        extra_args: &[String],
    ) -> Result<String>;
}

/// Adapter mapping the handler contract onto a Gemini web chat session,
/// with continuation backed by the on-disk session cache.
pub struct GeminiWebHandler {
    config: AdapterConfig,
    factory: Arc<dyn ClientFactory>,
    dependencies: Arc<dyn DependencyProvider>,
    models: Vec<ModelEntry>,
}

impl GeminiWebHandler {
    /// Build the handler. Model enumeration happens here and falls back
    /// to the static default list on failure; construction never fails
    /// because of it.
    pub fn new(
        config: AdapterConfig,
        factory: Arc<dyn ClientFactory>,
        dependencies: Arc<dyn DependencyProvider>,
    ) -> Self {
        let models = models::discover_models(factory.as_ref());
        debug!("Available models: {:?}", models);
        Self {
            config,
            factory,
            dependencies,
            models,
        }
    }

    /// Models offered for selection.
    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Async-native entry point for hosts that already run a reactor.
    ///
    /// One invocation performs exactly one strictly-ordered call sequence:
    /// resolve continuation, extract file references, read the cache,
    /// initialize the client, ensure the gem, start the chat, send, and
    /// persist the refreshed checkpoint.
    pub async fn generate(
        &self,
        prompt: &str,
        history: &[HistoryEntry],
        system_prompt: &[String],
        on_update: &dyn Fn(&str),
    ) -> Result<String> {
        let request_id = uuid::Uuid::new_v4().simple().to_string();
        debug!("Starting generation request {}", request_id);

        let system_prompt = system_prompt.join("\n");
        let (resolved, continuation) = history::resolve(history, prompt);
        debug!(
            "Continuation resolved: search={:?} update={:?}",
            continuation.search_key(),
            continuation.update_key()
        );

        let file_paths = files::collect_file_paths(
            &resolved.texts(),
            self.config.chat.require_existing_files,
        );

        let mut cache = SessionCache::open(&self.config.cache.path)?;
        let previous_session = match continuation.search_key() {
            Some(key) => Some(
                cache
                    .get(key)
                    .cloned()
                    .ok_or_else(|| HandlerError::SessionNotFound(key.to_string()))?,
            ),
            None => None,
        };
        debug!("Previous session present: {}", previous_session.is_some());

        let mut client = self.factory.connect()?;
        client.init(&InitOptions::from(&self.config.client)).await?;

        let gem = gems::ensure_gem(
            client.as_mut(),
            GEM_NAME,
            &system_prompt,
            self.config.chat.gem_policy,
        )
        .await?;

        let model = self.config.chat.model.clone();
        debug!("Starting chat with model {}", model);
        let mut session = client
            .start_chat(ChatParams {
                model,
                gem,
                metadata: previous_session,
            })
            .await?;

        let mut text = resolved.to_message_text();
        if text.trim().is_empty() {
            warn!("Prompt is empty; sending placeholder");
            text = EMPTY_PROMPT_PLACEHOLDER.to_string();
        }

        info!("Sending message ({} attached file(s))", file_paths.len());
        let response = session.send_message(&text, &file_paths).await?;

        if let Some(key) = continuation.update_key() {
            cache.insert(key, session.metadata().unwrap_or(Value::Null));
            cache.persist()?;
        }

        debug!("Request {} completed", request_id);
        on_update(&response.text);
        Ok(response.text)
    }
}

impl LlmHandler for GeminiWebHandler {
    fn key(&self) -> &str {
        HANDLER_KEY
    }

    fn is_installed(&self) -> bool {
        self.dependencies.is_installed()
    }

    fn install(&self) -> Result<()> {
        self.dependencies.install()
    }

    /// Blocking entry point: drives one request to completion on a fresh
    /// current-thread runtime. This is the single sync boundary; do not
    /// call it from inside an async context.
    fn generate_text(
        &self,
        prompt: &str,
        history: &[HistoryEntry],
        system_prompt: &[String],
        on_update: &dyn Fn(&str),
        _extra_args: &[String],
    ) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.generate(prompt, history, system_prompt, on_update))
    }
}
