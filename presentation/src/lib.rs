//! Presentation layer for medibot
//!
//! This crate contains the CLI definition, console output formatting,
//! the interactive chat loop and the HTTP chat endpoint.

pub mod chat;
pub mod cli;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use chat::{BufReadSource, ChatRepl, LineSource, ReedlineSource, ReplStats};
pub use cli::commands::{Cli, OutputFormat, RunMode};
pub use output::console::{ConsoleFormatter, REPL_FALLBACK};
pub use server::{ChatRequest, ChatServer, ServerError};
