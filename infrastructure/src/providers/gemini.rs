//! Google Gemini `generateContent` backend.
//!
//! Sends the fully rendered prompt as a single user turn together with the
//! fixed generation parameters and safety thresholds. A response with no
//! candidate text is treated as blocked.

use super::http::{BackendError, build_client, send_json};
use super::retry::RetryPolicy;
use async_trait::async_trait;
use medibot_application::{ProviderError, ResponseProvider};
use medibot_domain::{GenerationParams, Prompt, ProviderConfig, SafetySetting};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default Gemini REST base URL
pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

// ==================== Wire types ====================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
    safety_settings: Vec<WireSafetySetting>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl From<GenerationParams> for GenerationConfig {
    fn from(p: GenerationParams) -> Self {
        Self {
            temperature: p.temperature,
            top_p: p.top_p,
            top_k: p.top_k,
            max_output_tokens: p.max_output_tokens,
        }
    }
}

#[derive(Serialize)]
struct WireSafetySetting {
    category: &'static str,
    threshold: &'static str,
}

impl From<&SafetySetting> for WireSafetySetting {
    fn from(s: &SafetySetting) -> Self {
        Self {
            category: s.category.as_str(),
            threshold: s.threshold.as_str(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Joined text of the first candidate, or `Blocked` if there is none
    fn into_text(self) -> Result<String, ProviderError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            warn!("Prompt blocked by safety filter: {}", reason);
            return Err(ProviderError::Blocked);
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(ProviderError::Blocked);
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            if let Some(reason) = candidate.finish_reason {
                debug!("Candidate finished without text: {}", reason);
            }
            return Err(ProviderError::Blocked);
        }
        Ok(text)
    }
}

// ==================== Backend ====================

/// Gemini [`ResponseProvider`]
pub struct GenerativeBackend {
    config: Arc<ProviderConfig>,
    generation: GenerationParams,
    safety: Vec<SafetySetting>,
    retry: RetryPolicy,
    client: Client,
}

impl GenerativeBackend {
    pub fn new(
        config: Arc<ProviderConfig>,
        generation: GenerationParams,
        safety: Vec<SafetySetting>,
    ) -> Result<Self, BackendError> {
        let client = build_client(config.timeout)?;
        Ok(Self {
            retry: RetryPolicy::from_config(&config),
            config,
            generation,
            safety,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint_url.trim_end_matches('/'),
            self.config.model_name
        )
    }

    async fn attempt(&self, rendered: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: rendered }],
            }],
            generation_config: self.generation.into(),
            safety_settings: self.safety.iter().map(WireSafetySetting::from).collect(),
        };

        let request = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body);

        let response: GenerateResponse = send_json(request).await?;
        response.into_text()
    }
}

#[async_trait]
impl ResponseProvider for GenerativeBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let rendered = prompt.render();
        debug!(
            "Sending generateContent request for model {}",
            self.config.model_name
        );
        self.retry
            .run(self.name(), |_| self.attempt(&rendered))
            .await
    }
}
