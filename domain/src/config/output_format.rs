//! Output format value object

use serde::{Deserialize, Serialize};

/// How a one-shot answer is printed to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// The response envelope as JSON
    Json,
}
