//! Headless presentation panels.
//!
//! Each panel owns its input state, runs the [`KeyGate`](crate::credentials::KeyGate)
//! before calling the [`GeminiClient`](crate::client::GeminiClient), and keeps
//! the result or a short error message for display. Panels are `Send + Sync`
//! and may be driven concurrently; the only guard against overlapping calls is
//! the busy flag they expose for disabling the trigger control.

pub mod analyzer;
pub mod chat;
pub mod image;

pub use analyzer::{AnalyzerPanel, AnalyzerState};
pub use chat::{ChatPanel, CHAT_ERROR_REPLY, CHAT_GREETING, CHAT_NEEDS_KEY_REPLY};
pub use image::{ImagePanel, ImageState, IMAGE_KEY_ERROR};

use std::sync::{Mutex, MutexGuard, PoisonError};

// State locks are never held across an await.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs a closure when dropped. Releases a panel's busy count even when the
/// action future is cancelled mid-flight.
pub(crate) struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> OnDrop<F> {
    pub(crate) fn new(f: F) -> Self {
        Self(Some(f))
    }
}

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}
