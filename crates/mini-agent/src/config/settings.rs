use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. You provide clear, \
concise, and accurate responses to user queries. Be friendly and professional.";

pub const DEFAULT_ACKNOWLEDGMENT: &str =
    "Understood. I'll be a helpful, clear, and professional AI assistant.";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub gemini: GeminiConfig,
    pub conversation: ConversationConfig,
    pub persona: PersonaConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served at `/` when it exists
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConversationConfig {
    /// Prior exchanges replayed to the model (one exchange = user + assistant)
    pub context_exchanges: usize,
    /// Retention cap; oldest turns of a user are evicted past this
    pub max_turns_per_user: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PersonaConfig {
    pub system_prompt: String,
    pub acknowledgment: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            acknowledgment: DEFAULT_ACKNOWLEDGMENT.to_string(),
        }
    }
}

impl ConversationConfig {
    /// Number of context entries forwarded to the model
    pub fn context_entries(&self) -> usize {
        self.context_exchanges * 2
    }
}

impl Settings {
    /// Load `.env`, defaults, `config/settings.toml` and `APP_*` overrides
    /// (e.g. `APP_SERVER__PORT=9000`).
    /// `GEMINI_API_KEY` wins over any configured key.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::builder()?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("gemini.api_key", std::env::var("GEMINI_API_KEY").ok())?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let persona = PersonaConfig::default();
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.static_dir", "static")?
            .set_default("gemini.model", "gemini-3-flash-preview")?
            .set_default(
                "gemini.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("gemini.timeout_seconds", 60)?
            .set_default("conversation.context_exchanges", 5)?
            .set_default("conversation.max_turns_per_user", 100)?
            .set_default("persona.system_prompt", persona.system_prompt)?
            .set_default("persona.acknowledgment", persona.acknowledgment)?)
    }

    /// Defaults only, no file or environment. Used by tests and tooling.
    pub fn defaults() -> Result<Self> {
        Ok(Self::builder()?.build()?.try_deserialize()?)
    }

    /// A missing credential is fatal: the process must not serve traffic.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            bail!("GEMINI_API_KEY environment variable not set");
        }
        if self.gemini.timeout_seconds == 0 {
            bail!("gemini.timeout_seconds must be greater than zero");
        }
        Ok(())
    }

    pub fn static_dir(&self) -> PathBuf {
        PathBuf::from(&self.server.static_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::defaults().unwrap();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.gemini.model, "gemini-3-flash-preview");
        assert_eq!(settings.conversation.context_entries(), 10);
        assert_eq!(settings.persona, PersonaConfig::default());
        assert!(settings.gemini.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let mut settings = Settings::defaults().unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        settings.gemini.api_key = "   ".to_string();
        assert!(settings.validate().is_err());

        settings.gemini.api_key = "test-key".to_string();
        assert!(settings.validate().is_ok());
    }
}
