//! Infrastructure layer for medibot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider backends, configuration
//! file loading and the JSONL conversation logger.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlConversationLogger;
pub use providers::{
    BackendError, ChatCompletionBackend, GenerativeBackend, ProviderSettings, RetryPolicy,
    build_provider,
};
