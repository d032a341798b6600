//! Gemini client for the three Clarity capabilities.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod chat;
pub mod core;

pub use builder::GeminiClientBuilder;
pub use chat::{ChatSession, CLARITY_BOT_INSTRUCTION};
pub use core::GeminiClient;
