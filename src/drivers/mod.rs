//! Gemini wire format: request/response shapes for `generateContent`.
//!
//! Only the subset the Clarity client needs is modelled: text parts, inline
//! image data, `systemInstruction`, and the JSON / image generation configs.

pub mod gemini;

pub use gemini::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineData, Part, UsageMetadata,
};
