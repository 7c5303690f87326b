//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated, non-blank patient question
//! - [`error::DomainError`]: domain-level errors
//! - [`string::preview`]: log-safe text shortening

pub mod error;
pub mod question;
pub mod string;
