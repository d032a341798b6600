//! "Visualizer" header image panel.

use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use super::{lock, OnDrop};
use crate::client::GeminiClient;
use crate::credentials::KeyGate;
use crate::types::image::decode_data_uri;
use crate::types::ImageSize;
use crate::{Error, Result};

pub const IMAGE_KEY_ERROR: &str = "API Key selection cancelled or failed.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    pub prompt: String,
    pub size: ImageSize,
    /// Last generated image as a PNG data URI.
    pub image: Option<String>,
    pub error: Option<String>,
    pub pending: usize,
}

impl ImageState {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }
}

pub struct ImagePanel {
    client: Arc<GeminiClient>,
    gate: KeyGate,
    state: Mutex<ImageState>,
}

impl ImagePanel {
    pub fn new(client: Arc<GeminiClient>, gate: KeyGate) -> Self {
        Self {
            client,
            gate,
            state: Mutex::new(ImageState::default()),
        }
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        lock(&self.state).prompt = prompt.into();
    }

    pub fn set_size(&self, size: ImageSize) {
        lock(&self.state).size = size;
    }

    pub fn state(&self) -> ImageState {
        lock(&self.state).clone()
    }

    pub fn can_submit(&self) -> bool {
        let state = lock(&self.state);
        !state.is_loading() && !state.prompt.is_empty()
    }

    /// Generate an image for the current prompt and size. Empty prompt is ignored.
    pub async fn generate(&self) {
        let (prompt, size) = {
            let mut state = lock(&self.state);
            if state.prompt.is_empty() {
                return;
            }
            state.error = None;
            (state.prompt.clone(), state.size)
        };

        if let Err(e) = self.gate.ensure().await {
            warn!("image generation aborted: {}", e);
            lock(&self.state).error = Some(IMAGE_KEY_ERROR.to_string());
            return;
        }

        lock(&self.state).pending += 1;
        let busy = OnDrop::new(|| lock(&self.state).pending -= 1);
        let outcome = self.client.generate_image(&prompt, size).await;
        drop(busy);

        let mut state = lock(&self.state);
        match outcome {
            Ok(uri) => state.image = Some(uri),
            Err(e) => {
                warn!("image generation failed: {}", e);
                state.error = Some(e.user_message());
            }
        }
    }

    /// Write the last generated image to `path` as PNG bytes.
    pub async fn save_image(&self, path: impl AsRef<Path>) -> Result<usize> {
        let uri = self.state().image.ok_or(Error::NoImageData)?;
        let bytes = decode_data_uri(&uri)?;
        tokio::fs::write(path.as_ref(), &bytes).await?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "image saved");
        Ok(bytes.len())
    }
}
