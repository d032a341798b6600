//! "See it in action" text analysis panel.

use std::sync::{Arc, Mutex};
use tracing::warn;

use super::{lock, OnDrop};
use crate::client::GeminiClient;
use crate::credentials::KeyGate;
use crate::types::AnalysisResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzerState {
    pub text: String,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Analyses currently in flight.
    pub pending: usize,
}

impl AnalyzerState {
    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub struct AnalyzerPanel {
    client: Arc<GeminiClient>,
    gate: KeyGate,
    state: Mutex<AnalyzerState>,
}

impl AnalyzerPanel {
    pub fn new(client: Arc<GeminiClient>, gate: KeyGate) -> Self {
        Self {
            client,
            gate,
            state: Mutex::new(AnalyzerState::default()),
        }
    }

    pub fn set_text(&self, text: impl Into<String>) {
        lock(&self.state).text = text.into();
    }

    pub fn state(&self) -> AnalyzerState {
        lock(&self.state).clone()
    }

    /// Whether the "Analyze" control should be enabled.
    pub fn can_submit(&self) -> bool {
        let state = lock(&self.state);
        !state.is_loading() && !state.text.is_empty()
    }

    /// Analyze the current text. Empty input is ignored.
    pub async fn analyze(&self) {
        let text = {
            let state = lock(&self.state);
            if state.text.is_empty() {
                return;
            }
            state.text.clone()
        };

        if let Err(e) = self.gate.ensure().await {
            warn!("analysis aborted: {}", e);
            lock(&self.state).error = Some(e.user_message());
            return;
        }

        {
            let mut state = lock(&self.state);
            state.pending += 1;
            state.error = None;
        }

        let busy = OnDrop::new(|| lock(&self.state).pending -= 1);
        let outcome = self.client.analyze(&text).await;
        drop(busy);

        let mut state = lock(&self.state);
        match outcome {
            Ok(result) => state.result = Some(result),
            Err(e) => {
                warn!("analysis failed: {}", e);
                state.error = Some(e.user_message());
            }
        }
    }
}
