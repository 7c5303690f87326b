//! Port for structured conversation logging.
//!
//! Records each question and the envelope sent back, separately from
//! `tracing` diagnostics: tracing is for operators, this is a
//! machine-readable transcript (JSONL).

use serde_json::Value;

/// A structured conversation event.
pub struct ConversationEvent {
    /// Event type identifier ("question_received", "response_sent").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; implementations swallow write errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
