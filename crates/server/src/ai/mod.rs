//! LLM features powered by the Claude API

pub mod client;
pub mod prescription;
pub mod router;

pub use client::ClaudeClient;
