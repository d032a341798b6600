//! Mock HTTP server setup for integration tests

use clarity_gemini::credentials::CredentialStore;
use clarity_gemini::{GeminiClient, MemoryStore};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TEST_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Client pointed at the mock server with `TEST_KEY` configured.
    pub fn client(&self) -> GeminiClient {
        self.client_with_store(Arc::new(MemoryStore::with_key(TEST_KEY)))
    }

    pub fn client_with_store(&self, store: Arc<dyn CredentialStore>) -> GeminiClient {
        GeminiClient::builder()
            .base_url_override(&self.base_url)
            .credentials(store)
            .build()
            .expect("client should build against mock server")
    }

    pub fn path(model: &str) -> String {
        format!("/v1beta/models/{}:generateContent", model)
    }

    /// Mock a `generateContent` call for `model` whose body satisfies `body`.
    pub async fn mock_generate(&self, model: &str, body: Matcher, status: u16, reply: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", Self::path(model).as_str())
            .match_header("x-goog-api-key", TEST_KEY)
            .match_body(body)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(reply)
            .create_async()
            .await
    }

    /// Mock that must never be hit.
    pub async fn mock_unreachable(&self, model: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", Self::path(model).as_str())
            .expect(0)
            .create_async()
            .await
    }
}

/// Successful response whose single candidate carries `text`.
pub fn text_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 7, "totalTokenCount": 19 }
    })
    .to_string()
}

/// Successful response carrying one inline PNG part.
pub fn image_reply(data: &str) -> String {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Generated header." },
                    { "inlineData": { "mimeType": "image/png", "data": data } }
                ]
            },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub fn error_reply(code: u16, message: &str, status: &str) -> String {
    json!({ "error": { "code": code, "message": message, "status": status } }).to_string()
}
