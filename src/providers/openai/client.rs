use super::types::{ApiErrorBody, ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse};
use crate::provider::LLMProvider;
use crate::sse_stream::SseStreamExt;
use crate::{CallError, ChunkStream, ClientConfig, Completion, CompletionOptions, Error, Prompt};
use futures_util::{future, StreamExt};
use reqwest::{Client, Proxy};

/// HTTP client for an OpenAI-compatible Chat Completions endpoint.
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Build a client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .connect_timeout(config.timeouts.connect)
            .read_timeout(config.timeouts.read);

        builder = match &config.proxy {
            Some(url) => {
                let proxy = Proxy::all(url.as_str())
                    .map_err(|e| Error::config(format!("Invalid proxy URL '{url}': {e}")))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!(
            base_url = %config.base_url,
            proxy = config.proxy.as_deref().unwrap_or("none"),
            "Created chat-completion client"
        );

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a completion against this client.
    pub async fn get_completion(
        &self,
        prompt: impl Into<String>,
        options: &CompletionOptions,
    ) -> Result<Completion, Error> {
        crate::completion::complete_with(self, prompt, options).await
    }

    /// Start a streaming completion and hand back the lazy chunk stream
    /// without draining it.
    pub async fn stream_completion(
        &self,
        prompt: impl Into<String>,
        options: &CompletionOptions,
    ) -> Result<ChunkStream, Error> {
        let prompt = Prompt::user(prompt).with_optional_system(options.system_message.clone());
        let mut request = crate::completion::build_request(&prompt, options)?;
        request.stream = true;
        Ok(self.chat_stream(&request).await?)
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<reqwest::Response, CallError> {
        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            stream = request.stream,
            "Sending chat-completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::warn!(status = status.as_u16(), %message, "Chat-completion request rejected");
            return Err(CallError::api(status.as_u16(), message));
        }

        Ok(response)
    }
}

/// Extract a readable message from an error body.
fn api_error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return Some(parsed.error.message);
    }
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decode one SSE payload into a chunk; in-band error objects become errors.
fn decode_chunk(data: &str) -> Result<ChatCompletionChunk, CallError> {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(data) {
        return Err(CallError::stream(parsed.error.message));
    }
    Ok(serde_json::from_str(data)?)
}

#[async_trait::async_trait]
impl LLMProvider for OpenAIClient {
    async fn chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CallError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn chat_stream(&self, request: &ChatCompletionRequest) -> Result<ChunkStream, CallError> {
        let response = self.send(request).await?;

        let chunks = response
            .bytes_stream()
            .sse_events()
            .take_while(|event| future::ready(!matches!(event, Ok(e) if e.is_done())))
            .map(|event| event.and_then(|e| decode_chunk(&e.data)));

        Ok(Box::pin(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new(ClientConfig::new("test-key").with_proxy(None));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_default_proxy() {
        let client = OpenAIClient::new(ClientConfig::new("test-key")).unwrap();
        assert_eq!(client.base_url(), "https://api.openai.com/v1");
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let config = ClientConfig::new("test-key").with_proxy(Some("not a url".to_string()));
        assert!(matches!(OpenAIClient::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let client = OpenAIClient::new(ClientConfig::new("sk-hidden").with_proxy(None)).unwrap();
        assert!(!format!("{client:?}").contains("sk-hidden"));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("Incorrect API key provided")
        );
        assert_eq!(api_error_message("Bad Gateway\n").as_deref(), Some("Bad Gateway"));
        assert_eq!(api_error_message("   "), None);
    }

    #[test]
    fn test_decode_chunk() {
        let chunk = decode_chunk(r#"{"choices":[{"index":0,"delta":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(chunk.delta_text(), Some("hi"));

        let err = decode_chunk(r#"{"error":{"message":"overloaded"}}"#).unwrap_err();
        assert!(matches!(err, CallError::Stream(ref m) if m == "overloaded"));

        assert!(matches!(decode_chunk("not json"), Err(CallError::Decode(_))));
    }
}
