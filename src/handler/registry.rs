// Handler registry keyed by identifier string

use super::LlmHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry the host selects LLM backends from.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn LlmHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own key. A handler registered twice
    /// replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn LlmHandler>) {
        let key = handler.key().to_string();
        debug!("Registering handler {}", key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn LlmHandler>> {
        self.handlers.get(key).cloned()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::history::HistoryEntry;

    struct StubHandler {
        key: &'static str,
    }

    impl LlmHandler for StubHandler {
        fn key(&self) -> &str {
            self.key
        }

        fn is_installed(&self) -> bool {
            true
        }

        fn install(&self) -> Result<()> {
            Ok(())
        }

        fn generate_text(
            &self,
            prompt: &str,
            _history: &[HistoryEntry],
            _system_prompt: &[String],
            _on_update: &dyn Fn(&str),
            _extra_args: &[String],
        ) -> Result<String> {
            Ok(format!("echo: {}", prompt))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler { key: "stub" }));

        let handler = registry.get("stub").expect("registered handler");
        assert_eq!(handler.key(), "stub");
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = HandlerRegistry::new();
        registry.register(Arc::new(StubHandler { key: "stub" }));
        registry.register(Arc::new(StubHandler { key: "stub" }));
        assert_eq!(registry.len(), 1);
    }
}
