// Gem lifecycle - fetch, create, or refresh the handler's gem

use crate::client::{Gem, GeminiClient};
use crate::config::GemPolicy;
use crate::error::Result;
use tracing::{debug, info};

/// Make sure a gem with the given name exists remotely and return it.
///
/// Absent: a gem is created with the current system prompt. Present: the
/// configured policy decides — `Update` rewrites the gem's prompt text to
/// the current system prompt, `Reuse` returns it untouched. At most one
/// gem of the name is ever created.
pub async fn ensure_gem(
    client: &mut dyn GeminiClient,
    name: &str,
    system_prompt: &str,
    policy: GemPolicy,
) -> Result<Gem> {
    debug!("Fetching gems, looking for {}", name);
    let gems = client.fetch_gems().await?;
    let existing = gems.into_iter().find(|gem| gem.name == name);

    match existing {
        None => {
            info!("No existing gem found: creating {} gem", name);
            client.create_gem(name, system_prompt).await
        }
        Some(gem) => match policy {
            GemPolicy::Update => {
                info!("Updating existing {} gem", name);
                client.update_gem(&gem, name, system_prompt).await
            }
            GemPolicy::Reuse => {
                debug!("Reusing existing {} gem unmodified", name);
                Ok(gem)
            }
        },
    }
}
