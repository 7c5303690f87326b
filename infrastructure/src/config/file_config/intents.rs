//! Intent routing configuration from TOML (`[intents.*]` sections)

use medibot_domain::intent::{DEFAULT_APPOINTMENT_KEYWORDS, DEFAULT_MEDICINE_KEYWORDS};
use medibot_domain::{
    ConfigIssue, ConfigIssueCode, IntentClassifier, IntentKeywords, IntentRoute, IntentRoutes,
};
use serde::{Deserialize, Serialize};

/// One routed intent: its trigger phrases and the link it answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIntentConfig {
    /// Matched as lowercase substrings, in order
    pub keywords: Vec<String>,
    pub url: String,
    pub label: String,
    pub message: String,
}

impl FileIntentConfig {
    fn from_defaults(keywords: &[&str], route: IntentRoute) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            url: route.url,
            label: route.label,
            message: route.message,
        }
    }

    fn route(&self) -> IntentRoute {
        IntentRoute::new(&self.message, &self.url, &self.label)
    }
}

/// `[intents.appointment]` and `[intents.medicine]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIntentsConfig {
    pub appointment: FileIntentConfig,
    pub medicine: FileIntentConfig,
}

impl Default for FileIntentsConfig {
    fn default() -> Self {
        let routes = IntentRoutes::default();
        Self {
            appointment: FileIntentConfig::from_defaults(
                DEFAULT_APPOINTMENT_KEYWORDS,
                routes.appointment,
            ),
            medicine: FileIntentConfig::from_defaults(DEFAULT_MEDICINE_KEYWORDS, routes.medicine),
        }
    }
}

impl FileIntentsConfig {
    pub fn to_classifier(&self) -> (IntentClassifier, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let appointment = IntentKeywords::new(&self.appointment.keywords);
        let medicine = IntentKeywords::new(&self.medicine.keywords);

        for (intent, keywords) in [("appointment", &appointment), ("medicine", &medicine)] {
            if keywords.is_empty() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::EmptyKeywords {
                        intent: intent.to_string(),
                    },
                    format!(
                        "intents.{}.keywords is empty; this intent will never match",
                        intent
                    ),
                ));
            }
        }

        (IntentClassifier::new(appointment, medicine), issues)
    }

    pub fn to_routes(&self) -> (IntentRoutes, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        for (intent, config) in [("appointment", &self.appointment), ("medicine", &self.medicine)]
        {
            if config.url.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyField {
                        field: format!("intents.{}.url", intent),
                    },
                    format!("intents.{}.url must not be empty", intent),
                ));
            }
        }

        (
            IntentRoutes {
                appointment: self.appointment.route(),
                medicine: self.medicine.route(),
            },
            issues,
        )
    }
}
