//! Network seam for `generateContent` calls.
//!
//! [`HttpTransport`] is the reqwest implementation. The [`Transport`] trait lets
//! tests and embedders substitute canned responses.

pub mod error_classification;
pub mod http;

use async_trait::async_trait;

use crate::drivers::{GenerateContentRequest, GenerateContentResponse};
use crate::Result;

pub use http::HttpTransport;

/// Sends one `generateContent` request for `model`.
///
/// Implementations must surface every failure once; nothing above this layer retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
