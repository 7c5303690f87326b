//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

mod safety;

pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};

use crate::core::error::DomainError;
use std::str::FromStr;
use std::time::Duration;

/// Which backend answers free-text questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Google Gemini `generateContent`
    #[default]
    Gemini,
    /// OpenRouter (OpenAI-compatible chat completions)
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openrouter" | "chat" => Ok(ProviderKind::OpenRouter),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

/// Delay growth between retry attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffStrategy {
    /// Same delay before every retry
    #[default]
    Fixed,
    /// Doubling delay capped at `max_delay`, with deterministic jitter
    Exponential { max_delay: Duration },
}

/// Connection settings shared by every request to one provider.
///
/// Built once at startup and never mutated.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model_name: String,
    pub endpoint_url: String,
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Total attempts, including the first one
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub backoff: BackoffStrategy,
}

impl ProviderConfig {
    pub fn new(
        api_key: impl Into<String>,
        model_name: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: model_name.into(),
            endpoint_url: endpoint_url.into(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            backoff: BackoffStrategy::Fixed,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("backoff", &self.backoff)
            .finish()
    }
}

/// Fixed decoding parameters for the generative backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

/// Fixed request parameters for the chat-completion backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChatParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Sent as `HTTP-Referer` for OpenRouter attribution
    pub referer: Option<String>,
    /// Sent as `X-Title` for OpenRouter attribution
    pub title: Option<String>,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: 500,
            referer: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!(
            "openrouter".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenRouter
        );
        assert!(matches!(
            "bedrock".parse::<ProviderKind>(),
            Err(DomainError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::new("key", "model", "https://example.test");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.backoff, BackoffStrategy::Fixed);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::new("sk-secret", "model", "https://example.test");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_builder() {
        let config = ProviderConfig::new("k", "m", "u")
            .with_timeout(Duration::from_millis(500))
            .with_max_retries(5)
            .with_retry_delay(Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_delay, Duration::ZERO);
    }
}
