use crate::Error;
use std::env;
use std::time::Duration;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Local proxy every request is routed through unless overridden.
pub const DEFAULT_PROXY: &str = "http://127.0.0.1:7890";

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Network timeouts applied to the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(30),
        }
    }
}

/// Everything needed to build an [`OpenAIClient`](crate::OpenAIClient).
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub proxy: Option<String>,
    pub timeouts: Timeouts,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl ClientConfig {
    /// Configuration for the default endpoint through the default proxy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: Some(DEFAULT_PROXY.to_string()),
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Route requests through `proxy`, or connect directly with `None`.
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file found in the working directory or any parent is loaded
    /// first; variables already set in the process are never overwritten.
    pub fn from_env() -> Result<Self, Error> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(api_key_from_lookup(&lookup)?);
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}

/// Read the API key from the environment, loading `.env` the same way
/// [`ClientConfig::from_env`] does.
pub fn api_key_from_env() -> Result<String, Error> {
    load_dotenv();
    api_key_from_lookup(|key| env::var(key).ok())
}

fn api_key_from_lookup<F>(lookup: F) -> Result<String, Error>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_VAR)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::config(format!("{API_KEY_VAR} environment variable is required")))
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }
}
