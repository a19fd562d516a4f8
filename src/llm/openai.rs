use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Settings;
use crate::llm::client::{ChatMessage, CompletionClient};
use crate::{RecapError, Result};

pub(crate) const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1";
pub(crate) const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Client for any endpoint speaking the OpenAI chat-completions protocol
/// (Groq, OpenAI, local gateways).
pub struct OpenAiCompatClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAiCompatClient {
    pub fn from_settings(settings: &Settings, default_endpoint: &str) -> Result<Self> {
        let llm = &settings.llm;

        let api_key = llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(RecapError::Config(
                "API key is missing. Set llm.api_key in config, RECAP_API_KEY, or GROQ_API_KEY."
                    .to_string(),
            ));
        }

        let model = llm.model.trim();
        if model.is_empty() {
            return Err(RecapError::Config("llm.model must not be empty".to_string()));
        }

        let endpoint = if llm.endpoint.trim().is_empty() {
            default_endpoint
        } else {
            llm.endpoint.trim()
        };

        let mut builder = Client::builder();
        if llm.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(llm.timeout_secs));
        }
        let http = builder.build().map_err(|e| {
            RecapError::Config(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self::new(
            http,
            api_key,
            model.to_string(),
            endpoint,
            llm.temperature,
            llm.max_tokens,
        ))
    }

    pub fn new(
        http: Client,
        api_key: String,
        model: String,
        endpoint: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        Self {
            http,
            api_key,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            temperature,
            max_tokens,
        }
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            prompt_chars = messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "Sending chat completion request"
        );

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            tracing::warn!(status = status.as_u16(), "Completion API returned an error");
            return Err(RecapError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = response.json().await?;

        Ok(payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
