//! Idea records - structured startup ideas extracted from sources

use crate::{RecordId, SourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted startup idea
///
/// Ideas are only created by the pipeline, one per extraction candidate.
/// Ids are fresh for every extraction and must be unique across the store;
/// titles may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Unique identifier
    pub id: RecordId,

    /// Short, memorable title
    pub title: String,

    /// What the idea is and how it works
    pub description: String,

    /// Problem the idea solves
    pub problem: String,

    /// Who would benefit
    pub target_audience: String,

    /// Model-asserted clarity of the idea, 1-10
    pub confidence_score: u8,

    /// Model's reasoning for the idea's viability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Path of the source file
    pub source_file: String,

    /// Export format of the source file
    pub source_type: SourceType,

    /// First message's timestamp or the note's creation date
    pub timestamp: DateTime<Utc>,

    /// Conversation participants (iMessage and Skype only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,

    /// Leading excerpt of the source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Free-form tags, empty at creation
    #[serde(default)]
    pub tags: Vec<String>,

    /// When the idea was created
    pub created_at: DateTime<Utc>,

    /// Last modification of the idea
    pub updated_at: DateTime<Utc>,
}

impl Idea {
    /// Title normalized for duplicate comparison (trimmed, lowercase)
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Normalize a title for duplicate comparison
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_idea() -> Idea {
        let now = Utc::now();
        Idea {
            id: RecordId::from_string("idea-1"),
            title: "  Pet Sitter Marketplace ".to_string(),
            description: "Connect owners with sitters".to_string(),
            problem: "Finding trusted sitters".to_string(),
            target_audience: "Pet owners".to_string(),
            confidence_score: 7,
            reasoning: None,
            source_file: "/data/notes/ideas.md".to_string(),
            source_type: SourceType::AppleNote,
            timestamp: now,
            participants: None,
            context: Some("notes...".to_string()),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_normalized_title() {
        assert_eq!(sample_idea().normalized_title(), "pet sitter marketplace");
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_idea()).unwrap();
        assert_eq!(value["targetAudience"], "Pet owners");
        assert_eq!(value["confidenceScore"], 7);
        assert_eq!(value["sourceType"], "AppleNote");
        assert_eq!(value["sourceFile"], "/data/notes/ideas.md");
        assert!(value.get("reasoning").is_none());
        assert!(value.get("participants").is_none());
        assert_eq!(value["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_reads_dates_back() {
        let idea = sample_idea();
        let json = serde_json::to_string(&idea).unwrap();
        let back: Idea = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timestamp, idea.timestamp);
        assert_eq!(back.created_at, idea.created_at);
    }

    proptest! {
        /// Property: normalizing is idempotent and ignores surrounding whitespace
        #[test]
        fn test_normalize_title_idempotent(title in "\\PC{0,40}", pad in "[ \t]{0,3}") {
            let once = normalize_title(&title);
            prop_assert_eq!(normalize_title(&once), once.clone());
            prop_assert_eq!(normalize_title(&format!("{pad}{title}{pad}")), once);
        }
    }
}
