use super::message::Message;

/// A user prompt with an optional system message.
///
/// Always renders as `[system?, user]`, whatever order the builder
/// methods were called in.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    system: Option<String>,
    user: String,
}

impl Prompt {
    /// Create a prompt holding only the user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            system: None,
            user: content.into(),
        }
    }

    /// Set the system message, replacing any previous one.
    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.system = Some(content.into());
        self
    }

    /// Set the system message if one is given.
    pub fn with_optional_system(mut self, content: Option<impl Into<String>>) -> Self {
        self.system = content.map(Into::into);
        self
    }

    /// The user message text.
    pub fn text(&self) -> &str {
        &self.user
    }

    /// The system message text, if any.
    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    /// Render the ordered message list sent to the provider.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system {
            messages.push(Message::system(system.clone()));
        }
        messages.push(Message::user(self.user.clone()));
        messages
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Prompt::user(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Prompt::user(s)
    }
}
