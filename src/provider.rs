use crate::providers::openai::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::{CallError, ChunkStream};

/// A backend that can serve chat-completion requests.
#[async_trait::async_trait]
pub trait LLMProvider: Send + Sync {
    /// Issue a non-streaming request and return the decoded response.
    async fn chat(&self, request: &ChatCompletionRequest)
        -> Result<ChatCompletionResponse, CallError>;

    /// Issue a streaming request and return the lazy chunk stream.
    async fn chat_stream(&self, request: &ChatCompletionRequest) -> Result<ChunkStream, CallError>;
}
