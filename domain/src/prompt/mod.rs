//! Prompt domain
//!
//! The instruction template wrapped around every question sent to a model.

mod template;

pub use template::{DEFAULT_DISCLAIMER, ListStyle, Prompt, PromptBuilder, PromptTemplate};
