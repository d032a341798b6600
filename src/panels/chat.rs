//! Floating assistant chat panel.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

use super::{lock, OnDrop};
use crate::client::{ChatSession, GeminiClient};
use crate::credentials::KeyGate;
use crate::types::ChatMessage;

pub const CHAT_GREETING: &str =
    "Hi! I'm ClarityBot. Ask me anything about article analysis, AI detection, or how this extension works.";
pub const CHAT_NEEDS_KEY_REPLY: &str = "I need an API key to function. Please try again.";
pub const CHAT_ERROR_REPLY: &str =
    "Sorry, I encountered an error connecting to Gemini. Please check your API key.";

/// Chat panel with an append-only transcript.
///
/// User messages are appended in the order `send` is called, before any await,
/// so overlapping sends keep their order even if replies arrive later.
pub struct ChatPanel {
    client: Arc<GeminiClient>,
    gate: KeyGate,
    open: AtomicBool,
    pending: AtomicUsize,
    transcript: Mutex<Vec<ChatMessage>>,
    session: Mutex<Option<Arc<ChatSession>>>,
}

impl ChatPanel {
    pub fn new(client: Arc<GeminiClient>, gate: KeyGate) -> Self {
        Self {
            client,
            gate,
            open: AtomicBool::new(false),
            pending: AtomicUsize::new(0),
            transcript: Mutex::new(vec![ChatMessage::model(CHAT_GREETING)]),
            session: Mutex::new(None),
        }
    }

    pub fn toggle(&self) -> bool {
        !self.open.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// True while at least one reply is outstanding.
    pub fn is_typing(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).clone()
    }

    /// Messages appended after the first `from` entries.
    pub fn messages_since(&self, from: usize) -> Vec<ChatMessage> {
        lock(&self.transcript).iter().skip(from).cloned().collect()
    }

    pub fn has_session(&self) -> bool {
        lock(&self.session).is_some()
    }

    /// Send a message. Blank input is ignored; failures end up in the transcript.
    ///
    /// Dropping the returned future discards the reply but still clears the
    /// typing indicator.
    pub async fn send(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.push(ChatMessage::user(text));
        self.pending.fetch_add(1, Ordering::SeqCst);
        let _busy = OnDrop::new(|| {
            self.pending.fetch_sub(1, Ordering::SeqCst);
        });

        let reply = match self.gate.ensure().await {
            Err(e) => {
                warn!("chat blocked by key gate: {}", e);
                CHAT_NEEDS_KEY_REPLY.to_string()
            }
            Ok(()) => match self.session().send_message(text).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("chat error: {}", e);
                    CHAT_ERROR_REPLY.to_string()
                }
            },
        };

        self.push(ChatMessage::model(reply));
    }

    // Created on first use, reused for the panel's lifetime.
    fn session(&self) -> Arc<ChatSession> {
        let mut slot = lock(&self.session);
        Arc::clone(slot.get_or_insert_with(|| Arc::new(self.client.create_chat_session())))
    }

    fn push(&self, message: ChatMessage) {
        lock(&self.transcript).push(message);
    }
}
