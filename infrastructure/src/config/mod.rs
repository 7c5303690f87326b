//! Configuration file loading for medibot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MEDIBOT_`-prefixed environment variables (`MEDIBOT_SERVER__PORT=8080`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./medibot.toml` or `./.medibot.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/medibot/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileConfig, FileGeminiConfig, FileIntentConfig, FileIntentsConfig, FileLoggingConfig,
    FileOpenRouterConfig, FileOutputConfig, FilePromptConfig, FileProviderConfig, FileReplConfig,
    FileSafetySetting, FileServerConfig, expand_path,
};
pub use loader::ConfigLoader;
