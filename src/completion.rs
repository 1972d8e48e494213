//! The completion entry points.

use crate::aggregator::aggregate;
use crate::provider::LLMProvider;
use crate::providers::openai::types::{ChatCompletionRequest, RESERVED_FIELDS};
use crate::{CallError, Completion, CompletionOptions, Error, Prompt};

/// Send `prompt` to the process-wide client.
///
/// Builds `[system?, user]` from `prompt` and `options.system_message`,
/// forwards every option, and returns the first choice's text. With
/// `options.stream` set, the response stream is drained and its text
/// concatenated instead.
///
/// # Errors
///
/// [`Error::Config`] if the client cannot be created (no API key), and
/// [`Error::Completion`] for any failure of the call itself, with the
/// underlying [`CallError`] as its source.
pub async fn get_completion(
    prompt: impl Into<String>,
    options: &CompletionOptions,
) -> Result<Completion, Error> {
    let client = crate::client_provider::get_client()?;
    complete_with(client.as_ref(), prompt, options).await
}

/// Run a completion against an explicit provider.
pub async fn complete_with(
    provider: &dyn LLMProvider,
    prompt: impl Into<String>,
    options: &CompletionOptions,
) -> Result<Completion, Error> {
    let prompt = Prompt::user(prompt).with_optional_system(options.system_message.clone());
    let request = build_request(&prompt, options)?;

    if request.stream {
        let stream = provider.chat_stream(&request).await?;
        let streamed = aggregate(stream).await?;
        return Ok(Completion::Streamed(streamed));
    }

    let response = provider.chat(&request).await?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(CallError::EmptyResponse)?;
    Ok(Completion::Text(choice.message.content.unwrap_or_default()))
}

/// Translate a prompt and options into the wire request.
pub fn build_request(
    prompt: &Prompt,
    options: &CompletionOptions,
) -> Result<ChatCompletionRequest, CallError> {
    if prompt.text().is_empty() {
        return Err(CallError::invalid_request("prompt must not be empty"));
    }

    let mut extra = options.extra.clone();
    for field in RESERVED_FIELDS {
        if extra.remove(*field).is_some() {
            tracing::warn!(field, "Ignoring passthrough field that shadows a named option");
        }
    }

    Ok(ChatCompletionRequest {
        model: options.model.clone(),
        messages: prompt.messages(),
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        stream: options.stream,
        response_format: options.response_format.clone(),
        extra,
    })
}
