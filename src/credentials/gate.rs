//! The credential gate: no model call proceeds until a usable key exists.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use super::store::CredentialStore;
use crate::{Error, Result};

/// Environment-provided credential selection capability.
#[async_trait]
pub trait KeySelector: Send + Sync {
    /// Whether a key has already been selected.
    async fn has_selected_key(&self) -> Result<bool>;

    /// Run the interactive selection flow. Returns once the user is done.
    async fn open_select_key(&self) -> Result<()>;
}

/// Interactive source of a key typed or picked by the user.
///
/// `Ok(None)` means the user cancelled.
#[async_trait]
pub trait KeyPrompt: Send + Sync {
    async fn prompt_for_key(&self) -> Result<Option<String>>;
}

/// Selector that keeps the chosen key in a [`CredentialStore`].
pub struct StoreKeySelector {
    store: Arc<dyn CredentialStore>,
    prompt: Arc<dyn KeyPrompt>,
}

impl StoreKeySelector {
    pub fn new(store: Arc<dyn CredentialStore>, prompt: Arc<dyn KeyPrompt>) -> Self {
        Self { store, prompt }
    }
}

#[async_trait]
impl KeySelector for StoreKeySelector {
    async fn has_selected_key(&self) -> Result<bool> {
        Ok(self.store.load().is_some())
    }

    async fn open_select_key(&self) -> Result<()> {
        let key = self
            .prompt
            .prompt_for_key()
            .await?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::no_credential("API key selection cancelled"))?;
        self.store.store(&key)?;
        info!("API key selected");
        Ok(())
    }
}

/// Presence check plus selection flow gating every model call.
///
/// Without a selector the gate is permissive: `has_key` reports `true`, which is
/// the local/dev fallback when no selection capability exists.
#[derive(Clone, Default)]
pub struct KeyGate {
    selector: Option<Arc<dyn KeySelector>>,
}

impl KeyGate {
    pub fn new(selector: Arc<dyn KeySelector>) -> Self {
        Self {
            selector: Some(selector),
        }
    }

    pub fn permissive() -> Self {
        Self { selector: None }
    }

    pub fn has_selector(&self) -> bool {
        self.selector.is_some()
    }

    pub async fn has_key(&self) -> bool {
        match &self.selector {
            None => true,
            Some(selector) => match selector.has_selected_key().await {
                Ok(has) => has,
                Err(e) => {
                    warn!("key presence check failed: {}", e);
                    false
                }
            },
        }
    }

    /// Run the selection flow once. Does not retry.
    pub async fn request_key(&self) -> Result<()> {
        match &self.selector {
            Some(selector) => selector.open_select_key().await,
            None => {
                warn!("key selection not available in this environment");
                Err(Error::no_credential(
                    "key selection not available in this environment",
                ))
            }
        }
    }

    /// `has_key`, then the selection flow if needed, then a re-check.
    ///
    /// Returns `NoCredential` unless a usable key is present afterwards.
    pub async fn ensure(&self) -> Result<()> {
        if self.has_key().await {
            return Ok(());
        }
        self.request_key().await?;
        if self.has_key().await {
            Ok(())
        } else {
            Err(Error::no_credential(
                "no API key available after selection",
            ))
        }
    }
}

impl std::fmt::Debug for KeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGate")
            .field("selector", &self.selector.is_some())
            .finish()
    }
}
