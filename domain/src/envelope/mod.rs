//! Response envelope domain
//!
//! Every request produces exactly one [`ResponseEnvelope`], whatever the
//! route taken or the provider outcome.

mod normalize;

pub use normalize::normalize_provider_text;

use crate::intent::IntentRoute;
use serde::{Deserialize, Serialize};

/// Text returned in place of a safety-filtered answer
pub const BLOCKED_FALLBACK_TEXT: &str = "I'm sorry, I can't provide an answer to that question. Please rephrase it or consult a qualified healthcare provider.";

/// The structured response returned for every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    /// Static link for a routed intent
    Link {
        message: String,
        url: String,
        label: String,
    },
    /// Generated answer
    #[serde(rename = "text")]
    Content {
        #[serde(rename = "content")]
        text: String,
        /// Set when `text` is the safety-filter fallback
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        blocked: bool,
    },
    /// Provider-agnostic failure message
    Error { message: String },
}

impl ResponseEnvelope {
    pub fn link(route: &IntentRoute) -> Self {
        ResponseEnvelope::Link {
            message: route.message.clone(),
            url: route.url.clone(),
            label: route.label.clone(),
        }
    }

    pub fn content(text: impl Into<String>) -> Self {
        ResponseEnvelope::Content {
            text: text.into(),
            blocked: false,
        }
    }

    pub fn blocked() -> Self {
        ResponseEnvelope::Content {
            text: BLOCKED_FALLBACK_TEXT.to_string(),
            blocked: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResponseEnvelope::Error { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, ResponseEnvelope::Content { blocked: true, .. })
    }

    /// Short name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseEnvelope::Link { .. } => "link",
            ResponseEnvelope::Content { blocked: false, .. } => "text",
            ResponseEnvelope::Content { blocked: true, .. } => "blocked",
            ResponseEnvelope::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_serialization() {
        let envelope = ResponseEnvelope::link(&IntentRoute::new(
            "Book online.",
            "/appointment.php",
            "Book Appointment",
        ));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "type": "link",
                "message": "Book online.",
                "url": "/appointment.php",
                "label": "Book Appointment",
            })
        );
    }

    #[test]
    fn test_content_serialization_omits_blocked_flag() {
        let envelope = ResponseEnvelope::content("- rest");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "text", "content": "- rest"})
        );
    }

    #[test]
    fn test_blocked_serialization() {
        let value = serde_json::to_value(ResponseEnvelope::blocked()).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["blocked"], true);
        assert!(!value["content"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_error_serialization() {
        let envelope = ResponseEnvelope::error("Request timed out.");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "error", "message": "Request timed out."})
        );
        assert!(envelope.is_error());
    }

    #[test]
    fn test_content_deserializes_without_blocked() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"type":"text","content":"hi"}"#).unwrap();
        assert_eq!(envelope, ResponseEnvelope::content("hi"));
    }

    #[test]
    fn test_kind() {
        assert_eq!(ResponseEnvelope::content("x").kind(), "text");
        assert_eq!(ResponseEnvelope::blocked().kind(), "blocked");
        assert_eq!(ResponseEnvelope::error("x").kind(), "error");
    }
}
