//! Core types for idea extraction

use serde::{Deserialize, Serialize};

/// Lowest confidence score an idea can carry
pub const MIN_CONFIDENCE: u8 = 1;

/// Highest confidence score an idea can carry
pub const MAX_CONFIDENCE: u8 = 10;

/// An idea proposed by the model, before it is attached to a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCandidate {
    /// Short, memorable title
    pub title: String,

    /// What the idea is and how it works
    pub description: String,

    /// Problem it solves
    pub problem: String,

    /// Who benefits
    pub target_audience: String,

    /// How clearly defined the idea is (1-10)
    pub confidence_score: u8,

    /// Why the model thinks it is viable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl IdeaCandidate {
    /// Clamp a raw score into the accepted range
    pub fn clamp_confidence(raw: f64) -> u8 {
        if raw.is_nan() {
            return MIN_CONFIDENCE;
        }
        raw.round()
            .clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u8
    }
}
