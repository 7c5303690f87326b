//! OpenAI-compatible chat-completion backend (OpenRouter by default).
//!
//! Sends the prompt instructions as the system message and the question as
//! the user message, authenticating with a bearer token. Failed attempts are
//! retried by the configured [`RetryPolicy`].

use super::http::{BackendError, build_client, send_json};
use super::retry::RetryPolicy;
use async_trait::async_trait;
use medibot_application::{ProviderError, ResponseProvider};
use medibot_domain::{ChatParams, Prompt, ProviderConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Default OpenRouter chat-completions endpoint
pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion [`ResponseProvider`]
pub struct ChatCompletionBackend {
    config: Arc<ProviderConfig>,
    params: ChatParams,
    retry: RetryPolicy,
    client: Client,
}

impl ChatCompletionBackend {
    pub fn new(config: Arc<ProviderConfig>, params: ChatParams) -> Result<Self, BackendError> {
        let client = build_client(config.timeout)?;
        Ok(Self {
            retry: RetryPolicy::from_config(&config),
            config,
            params,
            client,
        })
    }

    fn request(&self, prompt: &Prompt) -> reqwest::RequestBuilder {
        let body = ChatRequest {
            model: &self.config.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.instructions(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.question(),
                },
            ],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        let mut request = self
            .client
            .post(&self.config.endpoint_url)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        if let Some(referer) = &self.params.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.params.title {
            request = request.header("X-Title", title);
        }
        request
    }

    async fn attempt(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let response: ChatResponse = send_json(self.request(prompt)).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Unknown("response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();
        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ResponseProvider for ChatCompletionBackend {
    fn name(&self) -> &str {
        "chat-completion"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        debug!(
            "Sending chat completion to {} with model {}",
            self.config.endpoint_url, self.config.model_name
        );
        self.retry
            .run(self.name(), |_| self.attempt(prompt))
            .await
    }
}
