use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::drivers::GenerateContentRequest;
use crate::structured::{analysis_prompt, parse_analysis};
use crate::transport::Transport;
use crate::types::image::png_data_uri;
use crate::types::{AnalysisResult, ImageSize};
use crate::{Error, Result};

use super::builder::GeminiClientBuilder;
use super::chat::{ChatSession, CLARITY_BOT_INSTRUCTION};

/// Client for structured analysis, chat and image generation.
///
/// Cheap to share behind an `Arc`; every call is independent except for chat,
/// whose state lives in the [`ChatSession`] it hands out.
pub struct GeminiClient {
    pub(crate) config: ClientConfig,
    pub(crate) transport: Arc<dyn Transport>,
}

impl GeminiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Score a text for usefulness, fluff and AI likelihood.
    ///
    /// Only the first 1000 characters are sent. A missing response text is
    /// treated as `{}` and therefore fails schema parsing.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let model = &self.config.analysis_model;
        let request = GenerateContentRequest::json_prompt(analysis_prompt(text));
        let response = self.transport.generate_content(model, &request).await?;

        let raw = response.text().unwrap_or_else(|| "{}".to_string());
        debug!(model = %model, bytes = raw.len(), "analysis response received");
        let result = parse_analysis(&raw)?;
        info!(
            score = result.score,
            fluff = result.fluff,
            ai = result.ai,
            "text analyzed"
        );
        Ok(result)
    }

    /// Open a new conversation with the ClarityBot persona and no history.
    pub fn create_chat_session(&self) -> ChatSession {
        ChatSession::new(
            Arc::clone(&self.transport),
            self.config.chat_model.clone(),
            CLARITY_BOT_INSTRUCTION,
        )
    }

    /// Generate a header image and return it as a PNG data URI.
    pub async fn generate_image(&self, prompt: &str, size: ImageSize) -> Result<String> {
        let model = &self.config.image_model;
        let request = GenerateContentRequest::image(prompt, size, &self.config.aspect_ratio);
        let response = self.transport.generate_content(model, &request).await?;

        let data = response.first_inline_data().ok_or(Error::NoImageData)?;
        info!(model = %model, size = %size, bytes = data.data.len(), "image generated");
        Ok(png_data_uri(&data.data))
    }
}
