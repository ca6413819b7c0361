pub mod settings;

pub use settings::{ConversationConfig, GeminiConfig, PersonaConfig, ServerConfig, Settings};
