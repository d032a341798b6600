//! Credential provisioning: where the API key lives and the gate that makes
//! sure one exists before any model call.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CredentialStore`] | Load/store the Gemini API key |
//! | [`KeyringStore`] | OS keyring with environment variable fallback |
//! | [`MemoryStore`] | Process-local store for tests and embedding |
//! | [`KeyGate`] | Presence check plus interactive selection flow |
//! | [`KeySelector`] | Environment capability the gate delegates to |

pub mod gate;
pub mod store;

pub use gate::{KeyGate, KeyPrompt, KeySelector, StoreKeySelector};
pub use store::{CredentialStore, KeyringStore, MemoryStore};
