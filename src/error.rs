use thiserror::Error;

/// Errors returned by the quick-completion library.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Completion request failed: {0}")]
    Completion(#[from] CallError),
}

/// The underlying failure of a chat-completion call.
///
/// Kept as the `source()` of [`Error::Completion`] so callers can tell a
/// transport failure from a rejected request or a malformed reply.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Streaming error: {0}")]
    Stream(String),

    #[error("Response contained no choices")]
    EmptyResponse,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// The wrapped call failure, if this is a completion error.
    pub fn call_error(&self) -> Option<&CallError> {
        match self {
            Error::Completion(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl CallError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        CallError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn stream(message: impl Into<String>) -> Self {
        CallError::Stream(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        CallError::InvalidRequest(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_completion_error_keeps_source() {
        let error: Error = CallError::api(401, "Incorrect API key provided").into();

        assert!(error.to_string().contains("Incorrect API key provided"));
        assert!(matches!(
            error.call_error(),
            Some(CallError::Api { status: 401, .. })
        ));

        let source = error.source().expect("completion error has a source");
        assert!(source.to_string().contains("401"));
    }

    #[test]
    fn test_config_error_display() {
        let error = Error::config("OPENAI_API_KEY is not set");
        assert!(error.to_string().contains("Invalid configuration"));
        assert!(error.call_error().is_none());
        assert!(error.source().is_none());
    }
}
