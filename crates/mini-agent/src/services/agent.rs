use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::PersonaConfig;
use crate::services::conversation::{ContextMessage, Role};
use crate::services::provider::{CompletionProvider, Content, ProviderError};

const PROVIDER_USER_ROLE: &str = "user";
const PROVIDER_MODEL_ROLE: &str = "model";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl AgentError {
    /// In-band rendering for callers that only carry text
    pub fn to_reply_text(&self) -> String {
        format!("Error processing message: {}", self)
    }
}

/// Map a context role onto the provider's role name
pub fn provider_role(role: Role) -> &'static str {
    match role {
        Role::User => PROVIDER_USER_ROLE,
        Role::Assistant => PROVIDER_MODEL_ROLE,
    }
}

/// Shapes a message plus prior context into a provider request.
///
/// Holds no per-call state. The persona is process-wide: `set_persona`
/// affects every subsequent call from every user.
pub struct ConversationAgent {
    provider: Arc<dyn CompletionProvider>,
    persona: RwLock<PersonaConfig>,
}

impl ConversationAgent {
    pub fn new(provider: Arc<dyn CompletionProvider>, persona: PersonaConfig) -> Self {
        Self {
            provider,
            persona: RwLock::new(persona),
        }
    }

    pub fn set_persona(&self, system_prompt: impl Into<String>) {
        self.persona.write().system_prompt = system_prompt.into();
    }

    pub fn persona(&self) -> PersonaConfig {
        self.persona.read().clone()
    }

    pub fn model_name(&self) -> String {
        self.provider.model_name()
    }

    /// Preamble, acknowledgment, the context role-for-role, then the new message
    pub fn build_contents(&self, message: &str, context: &[ContextMessage]) -> Vec<Content> {
        let persona = self.persona.read();

        let mut contents = Vec::with_capacity(context.len() + 3);
        contents.push(Content::text(PROVIDER_USER_ROLE, persona.system_prompt.as_str()));
        contents.push(Content::text(PROVIDER_MODEL_ROLE, persona.acknowledgment.as_str()));
        contents.extend(
            context
                .iter()
                .map(|msg| Content::text(provider_role(msg.role), msg.content.as_str())),
        );
        contents.push(Content::text(PROVIDER_USER_ROLE, message));
        contents
    }

    /// Ask the provider for a reply. The context is forwarded as given;
    /// windowing is the caller's job.
    pub async fn respond(
        &self,
        message: &str,
        context: &[ContextMessage],
    ) -> Result<String, AgentError> {
        let contents = self.build_contents(message, context);
        debug!(
            "Responding to message (len={}) with {} context entries",
            message.len(),
            context.len()
        );

        match self.provider.complete(&contents).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("Provider call failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Text-only rendering of `respond`; failures become
    /// `Error processing message: <cause>`
    pub async fn respond_text(&self, message: &str, context: &[ContextMessage]) -> String {
        self.respond(message, context)
            .await
            .unwrap_or_else(|e| e.to_reply_text())
    }
}
