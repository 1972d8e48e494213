use serde_json::{Map, Value};

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Parameters of a single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub system_message: Option<String>,
    pub stream: bool,
    /// Output encoding constraint, e.g. `{"type": "json_object"}`.
    pub response_format: Option<Value>,
    /// Provider-specific fields forwarded unchanged (`top_p`, `seed`, ...).
    pub extra: Map<String, Value>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            system_message: None,
            stream: false,
            response_format: None,
            extra: Map::new(),
        }
    }
}

impl CompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn system_message(mut self, system_message: impl Into<String>) -> Self {
        self.system_message = Some(system_message.into());
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn response_format(mut self, response_format: Value) -> Self {
        self.response_format = Some(response_format);
        self
    }

    /// Shorthand for `{"type": "json_object"}`.
    pub fn json_object(self) -> Self {
        self.response_format(serde_json::json!({ "type": "json_object" }))
    }

    /// Add a passthrough field.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = CompletionOptions::default();
        assert_eq!(options.model, "gpt-4o-mini");
        assert_eq!(options.temperature, 0.0);
        assert!(options.max_tokens.is_none());
        assert!(options.system_message.is_none());
        assert!(!options.stream);
        assert!(options.response_format.is_none());
        assert!(options.extra.is_empty());
    }

    #[test]
    fn test_builder() {
        let options = CompletionOptions::new()
            .model("gpt-4-turbo")
            .temperature(0.7)
            .max_tokens(64)
            .system_message("Be brief.")
            .stream(true)
            .json_object()
            .extra("seed", 42)
            .extra("top_p", 0.9);

        assert_eq!(options.model, "gpt-4-turbo");
        assert_eq!(options.max_tokens, Some(64));
        assert_eq!(options.system_message.as_deref(), Some("Be brief."));
        assert!(options.stream);
        assert_eq!(options.response_format, Some(json!({"type": "json_object"})));
        assert_eq!(options.extra.get("seed"), Some(&json!(42)));
        assert_eq!(options.extra.len(), 2);
    }
}
