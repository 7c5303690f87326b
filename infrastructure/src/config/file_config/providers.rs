//! Provider configuration from TOML (`[provider]`, `[gemini]`, `[openrouter]`)

use crate::providers::chat_completion::OPENROUTER_ENDPOINT;
use crate::providers::gemini::GEMINI_ENDPOINT;
use medibot_domain::{
    BackoffStrategy, ChatParams, ConfigIssue, ConfigIssueCode, GenerationParams,
    HarmBlockThreshold, HarmCategory, ProviderConfig, ProviderKind, SafetySetting,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend selection (`[provider]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// "gemini" or "openrouter"
    pub kind: String,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default().as_str().to_string(),
        }
    }
}

impl FileProviderConfig {
    pub fn parse_kind(&self) -> (Option<ProviderKind>, Vec<ConfigIssue>) {
        match self.kind.parse::<ProviderKind>() {
            Ok(kind) => (Some(kind), vec![]),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "provider.kind".to_string(),
                        value: self.kind.clone(),
                    },
                    format!(
                        "provider.kind: unknown provider '{}', expected 'gemini' or 'openrouter'",
                        self.kind
                    ),
                )],
            ),
        }
    }
}

/// Connection fields common to both backend sections
struct Connection<'a> {
    section: &'static str,
    api_key_env: &'a str,
    api_key: Option<&'a str>,
    model: &'a str,
    endpoint: &'a str,
    timeout_secs: u64,
    max_retries: u32,
    retry_delay_ms: u64,
    backoff: &'a str,
    max_delay_ms: u64,
}

impl Connection<'_> {
    fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.filter(|k| !k.trim().is_empty()) {
            return Some(key.trim().to_string());
        }
        std::env::var(self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    fn parse_backoff(&self) -> (BackoffStrategy, Vec<ConfigIssue>) {
        match self.backoff.trim().to_lowercase().as_str() {
            "fixed" => (BackoffStrategy::Fixed, vec![]),
            "exponential" => (
                BackoffStrategy::Exponential {
                    max_delay: Duration::from_millis(self.max_delay_ms),
                },
                vec![],
            ),
            other => (
                BackoffStrategy::Fixed,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("{}.backoff", self.section),
                        value: other.to_string(),
                    },
                    format!(
                        "{}.backoff: unknown value '{}', falling back to 'fixed'",
                        self.section, other
                    ),
                )],
            ),
        }
    }

    /// Build a [`ProviderConfig`], reporting every problem found
    fn parse(&self) -> (Option<ProviderConfig>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let section = self.section;

        let api_key = self.resolve_api_key();
        if api_key.is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKey {
                    env_var: self.api_key_env.to_string(),
                },
                format!(
                    "{}: no API key; set {} or {}.api_key",
                    section, self.api_key_env, section
                ),
            ));
        }

        for (field, value) in [("model", self.model), ("endpoint", self.endpoint)] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: format!("{}.{}", section, field),
                    },
                    format!("{}.{} must not be empty", section, field),
                ));
            }
        }

        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout {
                    field: format!("{}.timeout_secs", section),
                },
                format!("{}.timeout_secs must be greater than 0", section),
            ));
        }

        if self.max_retries == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRetries,
                format!(
                    "{}.max_retries is 0; at least one attempt is required",
                    section
                ),
            ));
        }

        let (backoff, backoff_issues) = self.parse_backoff();
        issues.extend(backoff_issues);

        let config = api_key.map(|key| {
            ProviderConfig::new(key, self.model.trim(), self.endpoint.trim())
                .with_timeout(Duration::from_secs(self.timeout_secs))
                .with_max_retries(self.max_retries)
                .with_retry_delay(Duration::from_millis(self.retry_delay_ms))
                .with_backoff(backoff)
        });
        (config, issues)
    }
}

/// One `[[gemini.safety]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSafetySetting {
    pub category: String,
    pub threshold: String,
}

/// Google Gemini settings (`[gemini]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable)
    pub api_key: Option<String>,
    pub model: String,
    /// REST base URL; the model path is appended
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Total attempts per request
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    /// "fixed" or "exponential"
    pub backoff: String,
    pub max_delay_ms: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Overrides the default medium-and-above thresholds when non-empty
    pub safety: Vec<FileSafetySetting>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        let generation = GenerationParams::default();
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            model: "gemini-1.5-pro-latest".to_string(),
            endpoint: GEMINI_ENDPOINT.to_string(),
            timeout_secs: 10,
            max_retries: 1,
            retry_delay_ms: 2_000,
            backoff: "fixed".to_string(),
            max_delay_ms: 30_000,
            temperature: generation.temperature,
            top_p: generation.top_p,
            top_k: generation.top_k,
            max_output_tokens: generation.max_output_tokens,
            safety: Vec::new(),
        }
    }
}

impl FileGeminiConfig {
    fn connection(&self) -> Connection<'_> {
        Connection {
            section: "gemini",
            api_key_env: &self.api_key_env,
            api_key: self.api_key.as_deref(),
            model: &self.model,
            endpoint: &self.endpoint,
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
            backoff: &self.backoff,
            max_delay_ms: self.max_delay_ms,
        }
    }

    pub fn parse_connection(&self) -> (Option<ProviderConfig>, Vec<ConfigIssue>) {
        self.connection().parse()
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }

    /// Parse the safety list, dropping invalid entries with an error issue
    pub fn parse_safety(&self) -> (Vec<SafetySetting>, Vec<ConfigIssue>) {
        if self.safety.is_empty() {
            return (SafetySetting::defaults(), vec![]);
        }

        let mut settings = Vec::new();
        let mut issues = Vec::new();
        for entry in &self.safety {
            let category = entry.category.parse::<HarmCategory>();
            let threshold = entry.threshold.parse::<HarmBlockThreshold>();
            match (category, threshold) {
                (Ok(category), Ok(threshold)) => {
                    settings.push(SafetySetting::new(category, threshold))
                }
                (Err(_), _) => {
                    issues.push(invalid_safety("gemini.safety.category", &entry.category))
                }
                (_, Err(_)) => {
                    issues.push(invalid_safety("gemini.safety.threshold", &entry.threshold))
                }
            }
        }
        (settings, issues)
    }
}

fn invalid_safety(field: &str, value: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::InvalidEnumValue {
            field: field.to_string(),
            value: value.to_string(),
        },
        format!("{}: unknown value '{}'", field, value),
    )
}

/// OpenRouter settings (`[openrouter]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenRouterConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (prefer the environment variable)
    pub api_key: Option<String>,
    pub model: String,
    /// Full chat-completions URL
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Total attempts per request
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    /// "fixed" or "exponential"
    pub backoff: String,
    pub max_delay_ms: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    /// `HTTP-Referer` attribution header
    pub referer: Option<String>,
    /// `X-Title` attribution header
    pub title: Option<String>,
}

impl Default for FileOpenRouterConfig {
    fn default() -> Self {
        let chat = ChatParams::default();
        Self {
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            model: "anthropic/claude-3-haiku".to_string(),
            endpoint: OPENROUTER_ENDPOINT.to_string(),
            timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 2_000,
            backoff: "fixed".to_string(),
            max_delay_ms: 30_000,
            temperature: chat.temperature,
            max_tokens: chat.max_tokens,
            referer: None,
            title: Some("Medical Chatbot".to_string()),
        }
    }
}

impl FileOpenRouterConfig {
    fn connection(&self) -> Connection<'_> {
        Connection {
            section: "openrouter",
            api_key_env: &self.api_key_env,
            api_key: self.api_key.as_deref(),
            model: &self.model,
            endpoint: &self.endpoint,
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            retry_delay_ms: self.retry_delay_ms,
            backoff: &self.backoff,
            max_delay_ms: self.max_delay_ms,
        }
    }

    pub fn parse_connection(&self) -> (Option<ProviderConfig>, Vec<ConfigIssue>) {
        self.connection().parse()
    }

    pub fn chat_params(&self) -> ChatParams {
        ChatParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            referer: self.referer.clone().filter(|s| !s.trim().is_empty()),
            title: self.title.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini_with_key() -> FileGeminiConfig {
        FileGeminiConfig {
            api_key: Some("g-key".to_string()),
            ..FileGeminiConfig::default()
        }
    }

    #[test]
    fn test_direct_api_key_wins() {
        let (config, issues) = gemini_with_key().parse_connection();
        assert!(issues.is_empty());
        let config = config.unwrap();
        assert_eq!(config.api_key, "g-key");
        assert_eq!(config.model_name, "gemini-1.5-pro-latest");
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_api_key_is_error() {
        let gemini = FileGeminiConfig {
            api_key_env: "MEDIBOT_TEST_UNSET_GEMINI_KEY".to_string(),
            ..FileGeminiConfig::default()
        };
        let (config, issues) = gemini.parse_connection();
        assert!(config.is_none());
        assert!(issues.iter().any(|i| {
            i.is_error()
                && matches!(
                    &i.code,
                    ConfigIssueCode::MissingApiKey { env_var }
                        if env_var == "MEDIBOT_TEST_UNSET_GEMINI_KEY"
                )
        }));
    }

    #[test]
    fn test_zero_timeout_and_retries() {
        let gemini = FileGeminiConfig {
            timeout_secs: 0,
            max_retries: 0,
            ..gemini_with_key()
        };
        let (_, issues) = gemini.parse_connection();
        assert!(issues.iter().any(|i| matches!(i.code, ConfigIssueCode::ZeroTimeout { .. })));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::ZeroRetries));
    }

    #[test]
    fn test_unknown_backoff_warns_and_falls_back() {
        let gemini = FileGeminiConfig {
            backoff: "linear".to_string(),
            ..gemini_with_key()
        };
        let (config, issues) = gemini.parse_connection();
        assert_eq!(config.unwrap().backoff, BackoffStrategy::Fixed);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_exponential_backoff() {
        let gemini = FileGeminiConfig {
            backoff: "Exponential".to_string(),
            max_delay_ms: 5_000,
            ..gemini_with_key()
        };
        let (config, _) = gemini.parse_connection();
        assert_eq!(
            config.unwrap().backoff,
            BackoffStrategy::Exponential {
                max_delay: Duration::from_secs(5)
            }
        );
    }

    #[test]
    fn test_safety_defaults_when_empty() {
        let (settings, issues) = FileGeminiConfig::default().parse_safety();
        assert_eq!(settings, SafetySetting::defaults());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_safety_overrides() {
        let gemini = FileGeminiConfig {
            safety: vec![
                FileSafetySetting {
                    category: "harassment".to_string(),
                    threshold: "BLOCK_ONLY_HIGH".to_string(),
                },
                FileSafetySetting {
                    category: "violence".to_string(),
                    threshold: "BLOCK_NONE".to_string(),
                },
            ],
            ..FileGeminiConfig::default()
        };
        let (settings, issues) = gemini.parse_safety();
        assert_eq!(
            settings,
            vec![SafetySetting::new(
                HarmCategory::Harassment,
                HarmBlockThreshold::BlockOnlyHigh
            )]
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_openrouter_defaults() {
        let openrouter = FileOpenRouterConfig::default();
        assert_eq!(openrouter.max_retries, 3);
        assert_eq!(openrouter.retry_delay_ms, 2_000);
        let chat = openrouter.chat_params();
        assert_eq!(chat.max_tokens, 500);
        assert!(chat.referer.is_none());
    }

    #[test]
    fn test_parse_kind() {
        let provider = FileProviderConfig {
            kind: "OpenRouter".to_string(),
        };
        assert_eq!(provider.parse_kind().0, Some(ProviderKind::OpenRouter));

        let provider = FileProviderConfig {
            kind: "bedrock".to_string(),
        };
        let (kind, issues) = provider.parse_kind();
        assert!(kind.is_none());
        assert!(issues[0].is_error());
    }
}
