//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on demand,
//! collecting [`ConfigIssue`]s instead of failing on the first problem.

mod intents;
mod logging;
mod output;
mod prompt;
mod providers;
mod repl;
mod server;

pub use intents::{FileIntentConfig, FileIntentsConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use prompt::FilePromptConfig;
pub use providers::{FileGeminiConfig, FileOpenRouterConfig, FileProviderConfig, FileSafetySetting};
pub use repl::FileReplConfig;
pub use server::FileServerConfig;

use super::error::ConfigError;
use crate::providers::ProviderSettings;
use medibot_application::RouterConfig;
use medibot_domain::{ConfigIssue, ProviderKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend selection
    pub provider: FileProviderConfig,
    /// Google Gemini settings
    pub gemini: FileGeminiConfig,
    /// OpenRouter settings
    pub openrouter: FileOpenRouterConfig,
    /// Instruction template
    pub prompt: FilePromptConfig,
    /// Keyword routes
    pub intents: FileIntentsConfig,
    /// HTTP endpoint
    pub server: FileServerConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Diagnostic and conversation logs
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Only the selected provider section is checked, so a missing
    /// OpenRouter key does not matter while Gemini is in use.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (kind, kind_issues) = self.provider.parse_kind();
        issues.extend(kind_issues);

        match kind {
            Some(ProviderKind::Gemini) => {
                issues.extend(self.gemini.parse_connection().1);
                issues.extend(self.gemini.parse_safety().1);
            }
            Some(ProviderKind::OpenRouter) => {
                issues.extend(self.openrouter.parse_connection().1);
            }
            None => {}
        }

        issues.extend(self.prompt.to_template().1);
        issues.extend(self.intents.to_classifier().1);
        issues.extend(self.intents.to_routes().1);

        issues
    }

    /// Router settings. Invalid values fall back to defaults; see [`validate`](Self::validate).
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::default()
            .with_classifier(self.intents.to_classifier().0)
            .with_routes(self.intents.to_routes().0)
            .with_template(self.prompt.to_template().0)
    }

    /// Settings for the selected backend, or every blocking issue
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let (kind, mut issues) = self.provider.parse_kind();

        let settings = match kind {
            Some(ProviderKind::Gemini) => {
                let (config, connection_issues) = self.gemini.parse_connection();
                let (safety, safety_issues) = self.gemini.parse_safety();
                issues.extend(connection_issues);
                issues.extend(safety_issues);
                config.map(|config| ProviderSettings::Gemini {
                    config,
                    generation: self.gemini.generation_params(),
                    safety,
                })
            }
            Some(ProviderKind::OpenRouter) => {
                let (config, connection_issues) = self.openrouter.parse_connection();
                issues.extend(connection_issues);
                config.map(|config| ProviderSettings::OpenRouter {
                    config,
                    chat: self.openrouter.chat_params(),
                })
            }
            None => None,
        };

        let errors: Vec<ConfigIssue> = issues.into_iter().filter(|i| i.is_error()).collect();
        match settings {
            Some(settings) if errors.is_empty() => Ok(settings),
            _ => Err(ConfigError::Invalid(errors)),
        }
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.repl.history_file.as_deref().map(expand_path)
    }

    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.logging.conversation_log.as_deref().map(expand_path)
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging.log_dir.as_deref().map(expand_path)
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
