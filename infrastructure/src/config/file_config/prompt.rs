//! Prompt template configuration from TOML (`[prompt]` section)

use medibot_domain::{ConfigIssue, ConfigIssueCode, ListStyle, PromptTemplate};
use serde::{Deserialize, Serialize};

/// Raw prompt template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptConfig {
    pub persona: String,
    /// Upper bound on answer length, in sentences
    pub max_sentences: u32,
    /// "numbered_or_dash" or "bullets"
    pub list_style: String,
    /// Reproduced verbatim at the end of every answer
    pub disclaimer: String,
}

impl Default for FilePromptConfig {
    fn default() -> Self {
        let template = PromptTemplate::default();
        Self {
            persona: template.persona,
            max_sentences: template.max_sentences,
            list_style: template.list_style.as_str().to_string(),
            disclaimer: template.disclaimer_text,
        }
    }
}

impl FilePromptConfig {
    /// Convert to a domain template. Unknown list styles fall back to the default.
    pub fn to_template(&self) -> (PromptTemplate, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = PromptTemplate::default();

        let list_style = match self.list_style.parse::<ListStyle>() {
            Ok(style) => style,
            Err(_) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "prompt.list_style".to_string(),
                        value: self.list_style.clone(),
                    },
                    format!(
                        "prompt.list_style: unknown value '{}', falling back to '{}'",
                        self.list_style,
                        ListStyle::default().as_str()
                    ),
                ));
                ListStyle::default()
            }
        };

        let persona = if self.persona.trim().is_empty() {
            issues.push(empty_field("prompt.persona"));
            defaults.persona
        } else {
            self.persona.trim().to_string()
        };

        let disclaimer_text = if self.disclaimer.trim().is_empty() {
            issues.push(empty_field("prompt.disclaimer"));
            defaults.disclaimer_text
        } else {
            self.disclaimer.clone()
        };

        let max_sentences = if self.max_sentences == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyField {
                    field: "prompt.max_sentences".to_string(),
                },
                "prompt.max_sentences is 0, using the default",
            ));
            defaults.max_sentences
        } else {
            self.max_sentences
        };

        (
            PromptTemplate {
                persona,
                max_sentences,
                list_style,
                disclaimer_text,
            },
            issues,
        )
    }
}

fn empty_field(field: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::EmptyField {
            field: field.to_string(),
        },
        format!("{} is empty, using the default", field),
    )
}
