use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::drivers::{Content, GenerateContentRequest};
use crate::transport::Transport;
use crate::Result;

/// Persona and scope of the landing page assistant.
pub const CLARITY_BOT_INSTRUCTION: &str = "You are ClarityBot, a helpful assistant for the Clarity Chrome Extension. \
You help users understand how the extension works, explain features like Fluff Detection and AI Pattern Recognition, \
and answer general questions about writing quality.";

/// A conversation context: a fixed system instruction plus the committed turns.
///
/// Turns are serialized: a second `send_message` waits until the first one has
/// finished. A failed turn leaves the history untouched.
pub struct ChatSession {
    id: Uuid,
    transport: Arc<dyn Transport>,
    model: String,
    system_instruction: String,
    history: Mutex<Vec<Content>>,
}

impl ChatSession {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        model: impl Into<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transport,
            model: model.into(),
            system_instruction: system_instruction.into(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Number of committed turns (user and model).
    pub async fn history_len(&self) -> usize {
        self.history.lock().await.len()
    }

    /// Send a user turn and return the model's reply text.
    ///
    /// A reply without text (for example a blocked candidate) comes back as an
    /// empty string and the turn is left out of the history.
    pub async fn send_message(&self, text: &str) -> Result<String> {
        let mut history = self.history.lock().await;
        let request = GenerateContentRequest::chat_turn(&self.system_instruction, &history, text);
        let response = self.transport.generate_content(&self.model, &request).await?;

        let Some(reply) = response.text() else {
            warn!(
                session = %self.id,
                finish_reason = response.finish_reason().unwrap_or("unknown"),
                "chat reply had no text; turn not committed"
            );
            return Ok(String::new());
        };
        history.push(Content::user(text));
        history.push(Content::model(reply.clone()));
        info!(session = %self.id, turns = history.len(), "chat turn completed");
        Ok(reply)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("model", &self.model)
            .finish()
    }
}
