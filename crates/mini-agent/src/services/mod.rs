pub mod agent;
pub mod conversation;
pub mod gemini;
pub mod provider;

pub use agent::{AgentError, ConversationAgent};
pub use conversation::ConversationStore;
pub use gemini::GeminiClient;
pub use provider::{CompletionProvider, Content, ProviderError};
