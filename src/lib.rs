//! A convenience layer for chat-completion requests.
//!
//! One call sends a prompt (with an optional system message) to an
//! OpenAI-compatible Chat Completions endpoint through a lazily created,
//! process-wide client. Streaming responses are drained and their text
//! concatenated before returning.
//!
//! ```no_run
//! use quick_completion::{get_completion, CompletionOptions};
//!
//! # async fn run() -> Result<(), quick_completion::Error> {
//! let answer = get_completion("2+2=?", &CompletionOptions::default()).await?;
//! println!("{}", answer.content());
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod client_provider;
pub mod completion;
pub mod error;
pub mod provider;
pub mod providers;
pub mod response;
pub mod sse_stream;
pub mod types;

// Re-export core types for easy usage
pub use aggregator::{aggregate, StreamAggregator};
pub use client_provider::{get_client, ClientProvider};
pub use completion::{complete_with, get_completion};
pub use error::{CallError, Error};
pub use provider::LLMProvider;
pub use providers::openai::types::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, Usage,
};
pub use providers::*;
pub use response::*;
pub use sse_stream::SseEvent;
pub use types::*;
