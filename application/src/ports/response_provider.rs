//! Response provider port
//!
//! Defines the interface for turning a prompt into generated text.

use async_trait::async_trait;
use medibot_domain::Prompt;
use thiserror::Error;

/// Errors a provider reports once its own retries are exhausted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider's safety filter withheld the answer
    #[error("Response blocked by safety filter")]
    Blocked,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    #[error("Timeout")]
    Timeout,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Map an HTTP status code to the taxonomy
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ProviderError::Unauthorized,
            429 => ProviderError::RateLimited,
            other => ProviderError::ServerError(other),
        }
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::Blocked)
    }

    /// Message safe to show to the person asking.
    ///
    /// Never includes provider names, raw error text or credentials.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Blocked => medibot_domain::BLOCKED_FALLBACK_TEXT.to_string(),
            ProviderError::Unauthorized => {
                "The assistant service could not authenticate. Please contact the site administrator."
                    .to_string()
            }
            ProviderError::RateLimited => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            ProviderError::ServerError(status) => format!(
                "The assistant service returned an error ({}). Please try again later.",
                status
            ),
            ProviderError::Timeout => {
                "Request timed out. Please check your connection and try again.".to_string()
            }
            ProviderError::Unknown(_) => "Temporary service issue. Please try again.".to_string(),
        }
    }
}

/// Source of generated answers
///
/// Implementations (adapters) live in the infrastructure layer. They own
/// their retry policy and map every failure to [`ProviderError`].
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Generate an answer for `prompt`
    async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}
