//! Aggregation of streamed chunks into a single completion.

use crate::providers::openai::types::{ChatCompletionChunk, Usage};
use crate::{Error, StreamedCompletion};
use futures_util::{Stream, StreamExt};

/// Accumulates streamed chunks in arrival order.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    content: String,
    chunks: Vec<ChatCompletionChunk>,
    finish_reason: Option<String>,
    usage: Option<Usage>,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one chunk, appending its incremental text if it carries any.
    pub fn process_chunk(&mut self, chunk: ChatCompletionChunk) {
        if let Some(text) = chunk.delta_text() {
            self.content.push_str(text);
        }
        if let Some(reason) = chunk.finish_reason() {
            self.finish_reason = Some(reason.to_string());
        }
        if let Some(usage) = &chunk.usage {
            self.usage = Some(usage.clone());
        }
        self.chunks.push(chunk);
    }

    /// Text accumulated so far.
    pub fn current_content(&self) -> &str {
        &self.content
    }

    /// Number of chunks seen so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn finalize(self) -> StreamedCompletion {
        StreamedCompletion {
            content: self.content,
            raw_response: self.chunks,
            finish_reason: self.finish_reason,
            usage: self.usage,
        }
    }
}

/// Drain `stream` and concatenate every chunk's text.
///
/// The stream is consumed to the end before returning; the first stream
/// error aborts aggregation.
pub async fn aggregate<S, E>(stream: S) -> Result<StreamedCompletion, Error>
where
    S: Stream<Item = Result<ChatCompletionChunk, E>>,
    E: Into<Error>,
{
    let mut stream = std::pin::pin!(stream);
    let mut aggregator = StreamAggregator::new();

    while let Some(chunk) = stream.next().await {
        aggregator.process_chunk(chunk.map_err(Into::into)?);
    }

    tracing::debug!(
        chunks = aggregator.chunk_count(),
        chars = aggregator.current_content().len(),
        "Stream drained"
    );
    Ok(aggregator.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CallError;
    use serde_json::json;

    fn chunk(content: Option<&str>) -> ChatCompletionChunk {
        serde_json::from_value(json!({
            "id": "chatcmpl-test",
            "choices": [{"index": 0, "delta": {"content": content}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_concatenates_in_order() {
        let mut aggregator = StreamAggregator::new();
        aggregator.process_chunk(chunk(Some("Hello ")));
        assert_eq!(aggregator.current_content(), "Hello ");
        aggregator.process_chunk(chunk(None));
        aggregator.process_chunk(chunk(Some("world!")));

        let completion = aggregator.finalize();
        assert_eq!(completion.content, "Hello world!");
        assert_eq!(completion.raw_response.len(), 3);
    }

    #[test]
    fn test_tracks_finish_reason_and_usage() {
        let mut aggregator = StreamAggregator::new();
        aggregator.process_chunk(chunk(Some("ok")));
        aggregator.process_chunk(
            serde_json::from_value(json!({
                "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
            }))
            .unwrap(),
        );
        aggregator.process_chunk(
            serde_json::from_value(json!({
                "choices": [],
                "usage": {"prompt_tokens": 4, "completion_tokens": 1, "total_tokens": 5}
            }))
            .unwrap(),
        );

        let completion = aggregator.finalize();
        assert_eq!(completion.content, "ok");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(5));
    }

    #[tokio::test]
    async fn test_aggregate_skips_empty_deltas() {
        let chunks = vec![
            Ok::<_, CallError>(chunk(Some("1"))),
            Ok(chunk(Some(""))),
            Ok(chunk(Some("2"))),
            Ok(chunk(Some("3"))),
        ];

        let completion = aggregate(futures_util::stream::iter(chunks)).await.unwrap();
        assert_eq!(completion.content, "123");
        assert_eq!(completion.raw_response.len(), 4);
    }

    #[tokio::test]
    async fn test_aggregate_empty_stream() {
        let chunks: Vec<Result<ChatCompletionChunk, CallError>> = vec![];
        let completion = aggregate(futures_util::stream::iter(chunks)).await.unwrap();
        assert_eq!(completion.content, "");
        assert!(completion.raw_response.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_stops_on_error() {
        let chunks = vec![
            Ok(chunk(Some("partial"))),
            Err(CallError::stream("connection reset")),
            Ok(chunk(Some("never seen"))),
        ];

        let err = aggregate(futures_util::stream::iter(chunks))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Completion(CallError::Stream(_))));
        assert!(err.to_string().contains("connection reset"));
    }
}
