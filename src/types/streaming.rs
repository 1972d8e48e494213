//! Types for streaming responses.

use crate::providers::openai::types::ChatCompletionChunk;
use crate::CallError;
use futures_util::stream::Stream;
use std::pin::Pin;

/// A lazy, in-order stream of completion chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, CallError>> + Send>>;
