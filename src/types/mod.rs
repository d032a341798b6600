//! Core data types shared by the client, the panels and the CLI.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AnalysisResult`] | Usefulness / fluff / AI-likelihood scores plus a summary |
//! | [`ChatMessage`] | One transcript entry with its [`ChatRole`] |
//! | [`ImageRequest`] | Prompt and [`ImageSize`] for header image generation |

pub mod analysis;
pub mod image;
pub mod message;

pub use analysis::AnalysisResult;
pub use image::{ImageRequest, ImageSize};
pub use message::{ChatMessage, ChatRole};
