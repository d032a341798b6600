use crate::client::core::GeminiClient;
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, KeyringStore};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct GeminiClientBuilder {
    config: Option<ClientConfig>,
    credentials: Option<Arc<dyn CredentialStore>>,
    transport: Option<Arc<dyn Transport>>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl GeminiClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            credentials: None,
            transport: None,
            base_url_override: None,
        }
    }

    /// Use an explicit configuration. Default is [`ClientConfig::default`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Where the HTTP transport reads the API key from. Default is the OS keyring
    /// with `GEMINI_API_KEY` / `API_KEY` fallback.
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Replace the HTTP transport entirely. Credentials are then ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the configured base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GeminiClient> {
        let mut config = self.config.unwrap_or_default();
        if let Some(base_url) = self.base_url_override {
            config.base_url = base_url;
        }
        config.validate()?;

        let transport = match self.transport {
            Some(t) => t,
            None => {
                let credentials = self
                    .credentials
                    .unwrap_or_else(|| Arc::new(KeyringStore::default()));
                Arc::new(HttpTransport::new(&config, credentials)?) as Arc<dyn Transport>
            }
        };

        Ok(GeminiClient::new(config, transport))
    }
}

impl Default for GeminiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
