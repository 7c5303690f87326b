//! Application layer for medibot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RouterConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    response_provider::{ProviderError, ResponseProvider},
};
pub use use_cases::handle_question::{RequestPhase, ResponseRouter};
