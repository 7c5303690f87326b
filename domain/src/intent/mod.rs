//! Intent domain
//!
//! Classifies a question into a small fixed set of actions. Routed intents
//! answer with a static link instead of a model call.

mod classifier;
mod route;

pub use classifier::{
    DEFAULT_APPOINTMENT_KEYWORDS, DEFAULT_MEDICINE_KEYWORDS, IntentClassifier, IntentKeywords,
    IntentTag,
};
pub use route::{IntentRoute, IntentRoutes};
