use crate::assistant::Assistant;
use crate::chat::{ChatAssistant, DEFAULT_API_BASE, DEFAULT_MODEL};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the language-model collaborators
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// No key means the assistant is disabled
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AssistantConfig {
    /// Pick the collaborators: a chat-completions client when an API key is
    /// configured, the disabled no-op otherwise
    pub fn build(self) -> Assistant {
        let Some(api_key) = self.api_key.filter(|k| !k.trim().is_empty()) else {
            warn!("No API key configured, AI search and insights are disabled");
            return Assistant::disabled();
        };

        match ChatAssistant::new(&self.api_base, api_key, &self.model, self.timeout) {
            Ok(chat) => {
                info!("AI assistant enabled: model {} at {}", chat.model(), self.api_base);
                let chat = Arc::new(chat);
                Assistant::new(chat.clone(), chat)
            }
            Err(e) => {
                warn!("Failed to initialize AI assistant, continuing without it: {}", e);
                Assistant::disabled()
            }
        }
    }
}
