//! Lazily created, process-wide client handle.

use crate::{ClientConfig, Error, OpenAIClient};
use std::sync::{Arc, Mutex, Once};

/// Holds at most one client, created on first request.
///
/// Creation runs under a lock, so concurrent first callers share one
/// client. A failed creation stores nothing and the next call tries again.
#[derive(Debug, Default)]
pub struct ClientProvider {
    slot: Mutex<Option<Arc<OpenAIClient>>>,
}

impl ClientProvider {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the stored client, creating it from `config` if there is none.
    pub fn get_or_init<F>(&self, config: F) -> Result<Arc<OpenAIClient>, Error>
    where
        F: FnOnce() -> Result<ClientConfig, Error>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(client) = slot.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(OpenAIClient::new(config()?)?);
        *slot = Some(Arc::clone(&client));
        Ok(client)
    }

    /// The stored client, if one has been created.
    pub fn get(&self) -> Option<Arc<OpenAIClient>> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

static CLIENT: ClientProvider = ClientProvider::new();
static PROXY_ENV: Once = Once::new();

/// Return the process-wide client, creating it from the environment on
/// first use.
pub fn get_client() -> Result<Arc<OpenAIClient>, Error> {
    CLIENT.get_or_init(|| {
        let config = ClientConfig::from_env()?;
        if let Some(proxy) = &config.proxy {
            export_proxy_env(proxy);
        }
        Ok(config)
    })
}

/// Set `http_proxy` and `https_proxy` for the whole process.
///
/// Only the first call has any effect.
pub fn export_proxy_env(proxy: &str) {
    PROXY_ENV.call_once(|| {
        std::env::set_var("http_proxy", proxy);
        std::env::set_var("https_proxy", proxy);
        tracing::debug!(proxy, "Exported process proxy variables");
    });
}
