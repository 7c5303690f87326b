//! Application-level configuration.
//!
//! - [`RouterConfig`]: classifier, link routes and prompt template used by
//!   [`ResponseRouter`](crate::use_cases::handle_question::ResponseRouter)

pub mod router_config;

pub use router_config::RouterConfig;
