//! OpenAI Chat Completions backend.

pub mod client;
pub mod types;

pub use client::OpenAIClient;
