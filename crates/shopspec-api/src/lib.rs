//! Chat-completion API communication for the ShopSpec widget
//!
//! This crate builds domain-scoped requests, sends them to the remote
//! completion endpoint and classifies every failure into [`ChatError`].

mod client;
mod error;
mod prompt;

pub use client::{mask_api_key, parse_completion, ChatBackend, PerplexityClient};
pub use error::ChatError;
pub use prompt::{build_outbound, build_system_prompt, OutboundRequest};
