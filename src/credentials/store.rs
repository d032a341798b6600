use keyring::Entry;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::{Error, ErrorContext, Result};

pub const KEYRING_SERVICE: &str = "clarity";
pub const KEYRING_ACCOUNT: &str = "gemini";
pub const DEFAULT_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Source of the API key used for every model call.
pub trait CredentialStore: Send + Sync {
    /// Current key, if one is configured. Blank values count as absent.
    fn load(&self) -> Option<String>;

    /// Persist a newly selected key.
    fn store(&self, key: &str) -> Result<()>;
}

/// OS keyring first, then environment variables in order.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    account: String,
    env_vars: Vec<String>,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
            env_vars: Vec::new(),
        }
    }

    pub fn with_env_fallback<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.env_vars = vars.into_iter().map(Into::into).collect();
        self
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account).map_err(|e| {
            Error::configuration_with_context(
                "keyring unavailable",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("keyring"),
            )
        })
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_ACCOUNT).with_env_fallback(DEFAULT_ENV_VARS)
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Option<String> {
        // 1. Try Keyring
        if let Ok(entry) = self.entry() {
            match entry.get_password() {
                Ok(key) if !key.trim().is_empty() => return Some(key),
                Ok(_) => {}
                Err(e) => debug!(service = %self.service, "no keyring credential: {}", e),
            }
        }

        // 2. Try Environment Variables
        self.env_vars
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|v| !v.trim().is_empty())
    }

    fn store(&self, key: &str) -> Result<()> {
        self.entry()?.set_password(key).map_err(|e| {
            Error::configuration_with_context(
                "failed to save API key",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("keyring"),
            )
        })
    }
}

/// In-process key holder.
#[derive(Debug, Default)]
pub struct MemoryStore {
    key: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: RwLock::new(Some(key.into())),
        }
    }

    pub fn clear(&self) {
        *self.key.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|k| !k.trim().is_empty())
    }

    fn store(&self, key: &str) -> Result<()> {
        *self.key.write().unwrap_or_else(PoisonError::into_inner) = Some(key.to_string());
        Ok(())
    }
}
