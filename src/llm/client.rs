use async_trait::async_trait;
use serde::Serialize;

use crate::config::Settings;
use crate::llm::openai::{OpenAiCompatClient, GROQ_ENDPOINT, OPENAI_ENDPOINT};
use crate::{RecapError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat-completion round trip.
///
/// Implementations return the trimmed text of the first choice, or an empty
/// string when the model produced none. Non-success responses surface as
/// [`RecapError::Upstream`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Build a completion client from runtime settings.
pub fn build_client(settings: &Settings) -> Result<Box<dyn CompletionClient>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "groq" => Ok(Box::new(OpenAiCompatClient::from_settings(
            settings,
            GROQ_ENDPOINT,
        )?)),
        "openai" => Ok(Box::new(OpenAiCompatClient::from_settings(
            settings,
            OPENAI_ENDPOINT,
        )?)),
        other => Err(RecapError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: groq, openai",
            other
        ))),
    }
}
