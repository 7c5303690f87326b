//! Console output formatter for response envelopes

use colored::Colorize;
use medibot_domain::{OutputFormat, ResponseEnvelope};

/// Shown in chat mode when an answer could not be produced
pub const REPL_FALLBACK: &str =
    "I'm unable to retrieve medical information at this time. Please check your connection or try later.";

/// Formats response envelopes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Globally disable ANSI colors (`[output] color = false`)
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format in the requested output format
    pub fn format(envelope: &ResponseEnvelope, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(envelope),
            OutputFormat::Json => Self::format_json(envelope),
        }
    }

    /// Human-readable rendering
    pub fn format_text(envelope: &ResponseEnvelope) -> String {
        match envelope {
            ResponseEnvelope::Link {
                message,
                url,
                label,
            } => format!(
                "{}\n{} {}",
                message,
                format!("{}:", label).cyan().bold(),
                url.underline()
            ),
            ResponseEnvelope::Content { text, blocked } => {
                if *blocked {
                    text.yellow().to_string()
                } else {
                    text.clone()
                }
            }
            ResponseEnvelope::Error { message } => {
                format!("{} {}", "Error:".red().bold(), message)
            }
        }
    }

    /// The envelope exactly as the HTTP endpoint would return it
    pub fn format_json(envelope: &ResponseEnvelope) -> String {
        serde_json::to_string_pretty(envelope)
            .unwrap_or_else(|e| format!(r#"{{"type":"error","message":"{}"}}"#, e))
    }

    /// Chat-mode rendering. Errors are replaced by a plain-language fallback.
    pub fn format_reply(envelope: &ResponseEnvelope) -> String {
        match envelope {
            ResponseEnvelope::Error { .. } => REPL_FALLBACK.to_string(),
            other => Self::format_text(other),
        }
    }
}
