//! Client configuration: endpoint, model ids and HTTP knobs.
//!
//! Defaults target the public Gemini REST API. Values can be loaded from a YAML
//! file and overlaid with `CLARITY_*` environment variables.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
/// Wide format used for article header images.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    pub analysis_model: String,
    pub chat_model: String,
    pub image_model: String,
    pub aspect_ratio: String,
    /// Unset means no client-side timeout.
    pub timeout_secs: Option<u64>,
    pub proxy_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            timeout_secs: None,
            proxy_url: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `CLARITY_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Load a YAML file; keys left out keep their defaults.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: ClientConfig = serde_yaml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("CLARITY_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = get("CLARITY_API_VERSION") {
            self.api_version = v;
        }
        if let Some(v) = get("CLARITY_ANALYSIS_MODEL") {
            self.analysis_model = v;
        }
        if let Some(v) = get("CLARITY_CHAT_MODEL") {
            self.chat_model = v;
        }
        if let Some(v) = get("CLARITY_IMAGE_MODEL") {
            self.image_model = v;
        }
        if let Some(secs) = get("CLARITY_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            self.timeout_secs = Some(secs);
        }
        if let Some(v) = get("CLARITY_PROXY_URL") {
            self.proxy_url = Some(v);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid base URL",
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(e.to_string())
                    .with_source("client_config"),
            )
        })?;

        for (field, value) in [
            ("api_version", &self.api_version),
            ("analysis_model", &self.analysis_model),
            ("chat_model", &self.chat_model),
            ("image_model", &self.image_model),
        ] {
            if value.trim().is_empty() {
                return Err(Error::configuration_with_context(
                    "value must not be empty",
                    ErrorContext::new()
                        .with_field_path(field)
                        .with_source("client_config"),
                ));
            }
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/'),
            model
        )
    }
}
