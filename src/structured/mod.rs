//! Structured output handling for the analysis capability.
//!
//! The analysis model is asked for a fixed-schema JSON object but may still wrap
//! it in markdown code fences. [`parse_analysis`] strips the fences and checks
//! the schema strictly: a result is either complete and in range, or an error.
//!
//! # Examples
//!
//! ```
//! use clarity_gemini::structured::parse_analysis;
//!
//! let raw = "```json\n{\"score\": 82, \"fluff\": 10, \"ai\": 35, \"summary\": \"Clear guide.\"}\n```";
//! let result = parse_analysis(raw).unwrap();
//! assert_eq!(result.score, 82);
//! ```

pub mod analysis;

pub use analysis::{analysis_prompt, parse_analysis, strip_code_fences, ANALYSIS_PREFIX_CHARS};
