//! Response provider adapters.
//!
//! Two interchangeable HTTP backends implement
//! [`ResponseProvider`](medibot_application::ResponseProvider): Gemini
//! `generateContent` and an OpenAI-compatible chat-completion endpoint.

pub mod chat_completion;
pub mod gemini;
mod http;
pub mod retry;

pub use chat_completion::ChatCompletionBackend;
pub use gemini::GenerativeBackend;
pub use http::BackendError;
pub use retry::RetryPolicy;

use medibot_application::ResponseProvider;
use medibot_domain::{ChatParams, GenerationParams, ProviderConfig, ProviderKind, SafetySetting};
use std::sync::Arc;
use tracing::info;

/// Everything needed to construct the configured backend
#[derive(Debug, Clone)]
pub enum ProviderSettings {
    Gemini {
        config: ProviderConfig,
        generation: GenerationParams,
        safety: Vec<SafetySetting>,
    },
    OpenRouter {
        config: ProviderConfig,
        chat: ChatParams,
    },
}

impl ProviderSettings {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderSettings::Gemini { .. } => ProviderKind::Gemini,
            ProviderSettings::OpenRouter { .. } => ProviderKind::OpenRouter,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        match self {
            ProviderSettings::Gemini { config, .. }
            | ProviderSettings::OpenRouter { config, .. } => config,
        }
    }
}

/// Build the backend selected by `settings`
pub fn build_provider(
    settings: &ProviderSettings,
) -> Result<Arc<dyn ResponseProvider>, BackendError> {
    info!(
        "Using {} provider with model {}",
        settings.kind(),
        settings.config().model_name
    );

    let provider: Arc<dyn ResponseProvider> = match settings {
        ProviderSettings::Gemini {
            config,
            generation,
            safety,
        } => Arc::new(GenerativeBackend::new(
            Arc::new(config.clone()),
            *generation,
            safety.clone(),
        )?),
        ProviderSettings::OpenRouter { config, chat } => Arc::new(ChatCompletionBackend::new(
            Arc::new(config.clone()),
            chat.clone(),
        )?),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_selects_backend() {
        let gemini = ProviderSettings::Gemini {
            config: ProviderConfig::new("k", "gemini-1.5-flash", gemini::GEMINI_ENDPOINT),
            generation: GenerationParams::default(),
            safety: SafetySetting::defaults(),
        };
        assert_eq!(build_provider(&gemini).unwrap().name(), "gemini");

        let chat = ProviderSettings::OpenRouter {
            config: ProviderConfig::new(
                "k",
                "openai/gpt-4o-mini",
                chat_completion::OPENROUTER_ENDPOINT,
            ),
            chat: ChatParams::default(),
        };
        assert_eq!(chat.kind(), ProviderKind::OpenRouter);
        assert_eq!(build_provider(&chat).unwrap().name(), "chat-completion");
    }
}
