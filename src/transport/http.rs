use async_trait::async_trait;
use reqwest::Proxy;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::drivers::{GenerateContentRequest, GenerateContentResponse};
use crate::{Error, ErrorContext, Result};

use super::error_classification::{classify_status, error_message};
use super::{Transport, TransportError};

/// reqwest-backed transport for the Gemini REST API.
///
/// The API key is resolved from the credential store on every call, so a key
/// selected after the transport was built is picked up by the next request.
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    "invalid proxy URL",
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_details(e.to_string())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            config: config.clone(),
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .credentials
            .load()
            .ok_or_else(|| Error::no_credential("no API key configured"))?;

        let url = self.config.endpoint(model);
        debug!(%url, contents = request.contents.len(), "sending generateContent");

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let class = classify_status(status.as_u16());
            let message = error_message(&body, class);
            warn!(model, status = status.as_u16(), class, "generateContent failed");
            return Err(Error::Remote {
                status: status.as_u16(),
                class: class.to_string(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(model, error = %e, "generateContent body did not decode");
            Error::Serialization(e)
        })?;

        info!(
            model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            candidates = parsed.candidates.len(),
            "generateContent completed"
        );
        Ok(parsed)
    }
}
