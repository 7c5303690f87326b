//! Interactive chat module
//!
//! Provides a line-editor based chat loop over the response router.

mod repl;

pub use repl::{BufReadSource, ChatRepl, LineSource, ReadOutcome, ReedlineSource, ReplStats};
