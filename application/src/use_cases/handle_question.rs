//! Handle Question use case.
//!
//! Routes one question to a [`ResponseEnvelope`]:
//!
//! ```text
//! Received → Classified ─┬─ RoutedLink ──────────────────────────┐
//!                        └─ RoutedGenerate ─┬─ Succeeded ────────┼─→ Responded
//!                                           └─ Failed ───────────┘
//! ```
//!
//! The router never fails: provider errors become an `Error` envelope (or a
//! blocked `Content` envelope for safety-filtered answers). Retries belong to
//! the provider, not to this layer.

use crate::config::RouterConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::response_provider::{ProviderError, ResponseProvider};
use medibot_domain::{
    IntentTag, PromptBuilder, Question, ResponseEnvelope, normalize_provider_text, preview,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-request lifecycle phase, reported at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Received,
    Classified,
    RoutedLink,
    RoutedGenerate,
    Succeeded,
    Failed,
    Responded,
}

impl RequestPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestPhase::Received => "received",
            RequestPhase::Classified => "classified",
            RequestPhase::RoutedLink => "routed_link",
            RequestPhase::RoutedGenerate => "routed_generate",
            RequestPhase::Succeeded => "succeeded",
            RequestPhase::Failed => "failed",
            RequestPhase::Responded => "responded",
        }
    }
}

/// Use case turning a question into a response envelope.
///
/// Holds only read-only state, so one instance can serve concurrent
/// requests behind an `Arc`.
#[derive(Clone)]
pub struct ResponseRouter {
    provider: Arc<dyn ResponseProvider>,
    config: RouterConfig,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ResponseRouter {
    pub fn new(provider: Arc<dyn ResponseProvider>, config: RouterConfig) -> Self {
        Self {
            provider,
            config,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Classify without answering
    pub fn classify(&self, question: &str) -> IntentTag {
        self.config.classifier.classify(question)
    }

    /// Answer a question. Always returns a well-formed envelope.
    pub async fn handle(&self, question: &str) -> ResponseEnvelope {
        let Some(question) = Question::try_new(question) else {
            debug!("Rejecting blank question");
            return ResponseEnvelope::error("message required");
        };
        trace_phase(RequestPhase::Received);

        self.conversation_logger.log(ConversationEvent::new(
            "question_received",
            serde_json::json!({ "question": question.content() }),
        ));

        let tag = self.classify(question.content());
        trace_phase(RequestPhase::Classified);
        info!(
            "Question classified as {}: {}",
            tag,
            preview(question.content(), 80)
        );

        let envelope = match self.config.routes.for_tag(tag) {
            Some(route) => {
                trace_phase(RequestPhase::RoutedLink);
                ResponseEnvelope::link(route)
            }
            None => {
                trace_phase(RequestPhase::RoutedGenerate);
                self.generate(&question).await
            }
        };
        trace_phase(RequestPhase::Responded);

        self.conversation_logger.log(ConversationEvent::new(
            "response_sent",
            serde_json::json!({
                "intent": tag.as_str(),
                "provider": self.provider.name(),
                "envelope": &envelope,
            }),
        ));

        envelope
    }

    async fn generate(&self, question: &Question) -> ResponseEnvelope {
        let prompt = PromptBuilder::build(question.content(), &self.config.template);

        match self.provider.complete(&prompt).await {
            Ok(raw) => {
                let text = normalize_provider_text(&raw);
                if text.is_empty() {
                    warn!("{} returned empty text; treating as blocked", self.provider.name());
                    trace_phase(RequestPhase::Failed);
                    return ResponseEnvelope::blocked();
                }
                trace_phase(RequestPhase::Succeeded);
                debug!("Generated {} bytes", text.len());
                ResponseEnvelope::content(text)
            }
            Err(ProviderError::Blocked) => {
                warn!("{} blocked the response", self.provider.name());
                trace_phase(RequestPhase::Failed);
                ResponseEnvelope::blocked()
            }
            Err(e) => {
                warn!("{} failed: {}", self.provider.name(), e);
                trace_phase(RequestPhase::Failed);
                ResponseEnvelope::error(e.user_message())
            }
        }
    }
}

fn trace_phase(phase: RequestPhase) {
    debug!(phase = phase.as_str(), "request phase");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use medibot_domain::{BLOCKED_FALLBACK_TEXT, Prompt};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockProvider {
        responses: Mutex<VecDeque<Result<String, ProviderError>>>,
        prompts: Mutex<Vec<Prompt>>,
    }

    impl MockProvider {
        fn new(responses: Vec<Result<String, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(VecDeque::from(responses)),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ResponseProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, prompt: &Prompt) -> Result<String, ProviderError> {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Unknown("no more responses".to_string())))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn router(provider: Arc<MockProvider>) -> ResponseRouter {
        ResponseRouter::new(provider, RouterConfig::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_appointment_returns_link_without_provider_call() {
        let provider = MockProvider::new(vec![]);
        let envelope = router(provider.clone())
            .handle("book appointment for medicine refill")
            .await;

        match envelope {
            ResponseEnvelope::Link { url, label, .. } => {
                assert_eq!(url, "/appointment.php");
                assert_eq!(label, "Book Appointment");
            }
            other => panic!("Expected Link, got {:?}", other),
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_medicine_returns_pharmacy_link() {
        let provider = MockProvider::new(vec![]);
        let envelope = router(provider.clone()).handle("I need to order drugs").await;

        assert!(matches!(
            envelope,
            ResponseEnvelope::Link { ref url, .. } if url == "/epharmacy.php"
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_general_question_calls_provider_once() {
        let provider = MockProvider::new(vec![Ok("* rest\n* fluids".to_string())]);
        let envelope = router(provider.clone())
            .handle("What are the symptoms of flu?")
            .await;

        assert_eq!(envelope, ResponseEnvelope::content("- rest\n- fluids"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompt_carries_question_and_template() {
        let provider = MockProvider::new(vec![Ok("ok".to_string())]);
        router(provider.clone()).handle("  How do I treat a burn?  ").await;

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts[0].question(), "How do I treat a burn?");
        assert!(prompts[0].instructions().contains("Disclaimer:"));
    }

    #[tokio::test]
    async fn test_blocked_becomes_flagged_content() {
        let provider = MockProvider::new(vec![Err(ProviderError::Blocked)]);
        let envelope = router(provider).handle("some risky question").await;

        match envelope {
            ResponseEnvelope::Content { text, blocked } => {
                assert!(blocked);
                assert_eq!(text, BLOCKED_FALLBACK_TEXT);
            }
            other => panic!("Expected Content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_provider_text_is_treated_as_blocked() {
        let provider = MockProvider::new(vec![Ok("   ".to_string())]);
        let envelope = router(provider).handle("headache").await;
        assert!(envelope.is_blocked());
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_agnostic_error() {
        let provider = MockProvider::new(vec![Err(ProviderError::Unknown(
            "dns error for api.example with key sk-123".to_string(),
        ))]);
        let envelope = router(provider).handle("headache").await;

        match envelope {
            ResponseEnvelope::Error { message } => {
                assert!(!message.contains("sk-123"));
                assert!(!message.contains("dns"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let provider = MockProvider::new(vec![Err(ProviderError::Timeout)]);
        let envelope = router(provider).handle("headache").await;
        assert_eq!(
            envelope,
            ResponseEnvelope::error(ProviderError::Timeout.user_message())
        );
    }

    #[tokio::test]
    async fn test_blank_question_is_error_without_provider_call() {
        let provider = MockProvider::new(vec![]);
        let envelope = router(provider.clone()).handle("   ").await;

        assert_eq!(envelope, ResponseEnvelope::error("message required"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_conversation_events_are_logged() {
        let provider = MockProvider::new(vec![Ok("answer".to_string())]);
        let logger = Arc::new(RecordingLogger::default());
        let router = router(provider).with_conversation_logger(logger.clone());

        router.handle("cold remedies").await;
        router.handle("").await;

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["question_received", "response_sent"]
        );
    }

    #[test]
    fn test_classify_is_repeatable() {
        let router = router(MockProvider::new(vec![]));
        let q = "where is the pharmacy";
        assert_eq!(router.classify(q), router.classify(q));
        assert_eq!(router.classify(q), IntentTag::Medicine);
    }
}
