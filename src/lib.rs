//! # clarity-gemini
//!
//! Credential-gated Gemini client behind the Clarity reading extension demo.
//!
//! ## Overview
//!
//! Three capabilities are offered, each a single request to a hosted model:
//!
//! - **Analysis**: usefulness, fluff and AI-likelihood scores for a text
//! - **Chat**: a ClarityBot conversation that keeps its turns in a session
//! - **Image generation**: a 16:9 header image returned as a PNG data URI
//!
//! Every call goes through the [`KeyGate`] first: while no usable API key is
//! configured, the interactive selection flow runs before anything is sent.
//! Failures are surfaced once; nothing retries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clarity_gemini::{GeminiClient, ImageSize};
//!
//! #[tokio::main]
//! async fn main() -> clarity_gemini::Result<()> {
//!     let client = GeminiClient::builder().build()?;
//!
//!     let report = client.analyze("Ten tips you won't believe...").await?;
//!     println!("usefulness {}/100: {}", report.score, report.summary);
//!
//!     let session = client.create_chat_session();
//!     println!("{}", session.send_message("What is fluff detection?").await?);
//!
//!     let png = client.generate_image("A tidy desk at dawn", ImageSize::Size2K).await?;
//!     assert!(png.starts_with("data:image/png;base64,"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | `GeminiClient`, its builder and chat sessions |
//! | [`credentials`] | Credential stores and the key gate |
//! | [`panels`] | Headless analyzer, chat and image panels |
//! | [`structured`] | Analysis prompt and fenced-JSON parsing |
//! | [`drivers`] | Gemini `generateContent` wire format |
//! | [`transport`] | HTTP transport and status classification |
//! | [`types`] | Analysis results, chat messages, image sizes |
//! | [`config`] | Endpoint and model configuration |

pub mod client;
pub mod config;
pub mod credentials;
pub mod drivers;
pub mod panels;
pub mod structured;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{ChatSession, GeminiClient, GeminiClientBuilder};
pub use config::ClientConfig;
pub use credentials::{CredentialStore, KeyGate, KeySelector, KeyringStore, MemoryStore};
pub use panels::{AnalyzerPanel, ChatPanel, ImagePanel};
pub use types::{AnalysisResult, ChatMessage, ChatRole, ImageRequest, ImageSize};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
