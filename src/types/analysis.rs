//! Structured analysis result.

use serde::{Deserialize, Serialize};

/// Scores returned by the analysis model. Every score is within `0..=100`;
/// a result is only ever constructed fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Usefulness score.
    pub score: u8,
    /// Share of words that add no value.
    pub fluff: u8,
    /// Likelihood the text was machine written.
    pub ai: u8,
    /// One sentence summary.
    pub summary: String,
}

impl AnalysisResult {
    /// Matches the landing page's "looks useful" badge threshold.
    pub fn is_useful(&self) -> bool {
        self.score > 70
    }
}
