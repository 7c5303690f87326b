//! Domain layer for medibot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Intent routing
//!
//! Every question is first classified by keyword into an [`IntentTag`].
//! Appointment and medicine requests are answered with a static link;
//! everything else goes to a language model.
//!
//! ## Envelope
//!
//! A request always yields exactly one [`ResponseEnvelope`]: a link, a
//! generated text, or a provider-agnostic error.

pub mod config;
pub mod core;
pub mod envelope;
pub mod intent;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, question::Question, string::preview};
pub use envelope::{BLOCKED_FALLBACK_TEXT, ResponseEnvelope, normalize_provider_text};
pub use intent::{IntentClassifier, IntentKeywords, IntentRoute, IntentRoutes, IntentTag};
pub use prompt::{ListStyle, Prompt, PromptBuilder, PromptTemplate};
pub use providers::{
    BackoffStrategy, ChatParams, GenerationParams, HarmBlockThreshold, HarmCategory,
    ProviderConfig, ProviderKind, SafetySetting,
};
