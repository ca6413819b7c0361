use std::sync::Arc;

use crate::config::Settings;
use crate::services::{ConversationAgent, ConversationStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConversationStore>,
    pub agent: Arc<ConversationAgent>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        store: Arc<ConversationStore>,
        agent: Arc<ConversationAgent>,
        settings: Settings,
    ) -> Self {
        Self {
            store,
            agent,
            settings: Arc::new(settings),
        }
    }
}
