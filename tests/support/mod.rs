use quick_completion::{ClientConfig, OpenAIClient};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

/// Route library logs to the test harness; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Client pointed at `server`, connecting directly.
pub fn client_for(server: &MockServer) -> OpenAIClient {
    init_tracing();
    let config = ClientConfig::new("test-api-key")
        .with_base_url(server.uri())
        .with_proxy(None);
    OpenAIClient::new(config).expect("Failed to create client")
}

/// A non-streaming response whose first choice says `content`.
pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 1, "total_tokens": 10}
    })
}

/// An SSE body streaming `deltas`, closed by a finish chunk and `[DONE]`.
pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    let mut push = |chunk: Value| body.push_str(&format!("data: {chunk}\n\n"));

    push(json!({
        "id": "chatcmpl-123",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"role": "assistant", "content": ""}, "finish_reason": null}]
    }));
    for delta in deltas {
        push(json!({
            "id": "chatcmpl-123",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": delta}, "finish_reason": null}]
        }));
    }
    push(json!({
        "id": "chatcmpl-123",
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
    }));

    body.push_str("data: [DONE]\n\n");
    body
}
