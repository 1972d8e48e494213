//! Results of a completion call.

use crate::providers::openai::types::{ChatCompletionChunk, Usage};

/// The outcome of [`get_completion`](crate::get_completion).
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// First choice's message content of a non-streaming call.
    Text(String),
    /// Aggregated result of a streaming call.
    Streamed(StreamedCompletion),
}

/// A fully drained streaming response.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamedCompletion {
    /// Concatenated incremental text, in arrival order.
    pub content: String,
    /// Every chunk received, in arrival order.
    pub raw_response: Vec<ChatCompletionChunk>,
    pub finish_reason: Option<String>,
    pub usage: Option<Usage>,
}

impl Completion {
    /// The generated text, whichever way it was delivered.
    pub fn content(&self) -> &str {
        match self {
            Completion::Text(text) => text,
            Completion::Streamed(streamed) => &streamed.content,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Completion::Text(text) => text,
            Completion::Streamed(streamed) => streamed.content,
        }
    }

    pub fn is_streamed(&self) -> bool {
        matches!(self, Completion::Streamed(_))
    }

    pub fn as_streamed(&self) -> Option<&StreamedCompletion> {
        match self {
            Completion::Streamed(streamed) => Some(streamed),
            Completion::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_accessors() {
        let text = Completion::Text("4".to_string());
        assert_eq!(text.content(), "4");
        assert!(!text.is_streamed());
        assert!(text.as_streamed().is_none());

        let streamed = Completion::Streamed(StreamedCompletion {
            content: "123".to_string(),
            raw_response: Vec::new(),
            finish_reason: Some("stop".to_string()),
            usage: None,
        });
        assert_eq!(streamed.content(), "123");
        assert!(streamed.is_streamed());
        assert_eq!(streamed.into_content(), "123");
    }
}
