// Model enumeration with static fallback

use crate::client::ClientFactory;
use tracing::{debug, warn};

/// A model offered for selection: human-readable name plus the wire
/// identifier the remote service expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    pub display_name: String,
    pub model_name: String,
}

impl ModelEntry {
    pub fn new(display_name: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            model_name: model_name.into(),
        }
    }
}

/// Models offered when the client library cannot be asked.
const DEFAULT_MODELS: &[(&str, &str)] = &[
    ("Default", "unspecified"),
    ("Gemini 2.5 Flash", "gemini-2.5-flash"),
    ("Gemini 2.5 Pro", "gemini-2.5-pro"),
    ("Gemini 3.0 Pro", "gemini-3.0-pro"),
];

pub fn default_models() -> Vec<ModelEntry> {
    DEFAULT_MODELS
        .iter()
        .map(|(display, wire)| ModelEntry::new(*display, *wire))
        .collect()
}

/// Ask the client library which models it supports, falling back to the
/// static default list on any failure. Never propagates an error; this
/// runs during handler construction, which must not fail.
pub fn discover_models(factory: &dyn ClientFactory) -> Vec<ModelEntry> {
    match factory.supported_models() {
        Ok(models) if !models.is_empty() => {
            debug!("Client library reports {} model(s)", models.len());
            models
        }
        Ok(_) => {
            warn!("Client library reported no models; using default model list");
            default_models()
        }
        Err(err) => {
            warn!(
                "Could not enumerate models from client library ({}); using default model list",
                err
            );
            default_models()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientFactory, GeminiClient};
    use crate::error::{HandlerError, Result};

    struct FailingFactory;

    impl ClientFactory for FailingFactory {
        fn connect(&self) -> Result<Box<dyn GeminiClient>> {
            Err(HandlerError::DependencyMissing("gemini_webapi".into()))
        }

        fn supported_models(&self) -> Result<Vec<ModelEntry>> {
            Err(HandlerError::DependencyMissing("gemini_webapi".into()))
        }
    }

    struct EnumeratingFactory;

    impl ClientFactory for EnumeratingFactory {
        fn connect(&self) -> Result<Box<dyn GeminiClient>> {
            Err(HandlerError::DependencyMissing("gemini_webapi".into()))
        }

        fn supported_models(&self) -> Result<Vec<ModelEntry>> {
            Ok(vec![ModelEntry::new("Gemini 2.5 Flash", "gemini-2.5-flash")])
        }
    }

    #[test]
    fn test_default_list_is_nonempty() {
        let models = default_models();
        assert!(!models.is_empty());
        assert!(models.iter().any(|m| m.model_name == "gemini-2.5-flash"));
    }

    #[test]
    fn test_discovery_failure_falls_back() {
        let models = discover_models(&FailingFactory);
        assert_eq!(models, default_models());
    }

    #[test]
    fn test_discovery_uses_library_enumeration() {
        let models = discover_models(&EnumeratingFactory);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].display_name, "Gemini 2.5 Flash");
    }
}
