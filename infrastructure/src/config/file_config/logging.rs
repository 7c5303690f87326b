//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation transcript (`~` is expanded)
    pub conversation_log: Option<String>,
    /// Directory for daily rolling diagnostic logs
    pub log_dir: Option<String>,
}
