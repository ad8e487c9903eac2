//! Source records - one per input file

use crate::{RecordId, SourceType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted processing state of one input file
///
/// A source is created the first time its file is discovered. `processed`
/// flips to true once extraction for the file completes without error, and
/// a processed source found again at the same path is reused unchanged.
///
/// "Processed" means the extraction was attempted and did not fail. Chunks
/// skipped for being too short, or replies with no usable JSON, still count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Stable identifier, preserved across runs
    pub id: RecordId,

    /// Export format of the file
    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Absolute path of the file
    pub path: String,

    /// File name within its directory
    pub filename: String,

    /// Whether extraction has completed for this file
    pub processed: bool,

    /// When extraction completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,

    /// Number of ideas produced by the last successful extraction
    #[serde(default)]
    pub ideas_extracted: usize,

    /// When the file was first discovered
    pub created_at: DateTime<Utc>,

    /// Last modification of this record
    pub updated_at: DateTime<Utc>,
}

impl Source {
    /// Create a pending source for a newly discovered file
    pub fn discovered(
        source_type: SourceType,
        path: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            source_type,
            path: path.into(),
            filename: filename.into(),
            processed: false,
            processed_at: None,
            ideas_extracted: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reset a previously seen, unprocessed source to pending
    ///
    /// Keeps the id, creation time and last idea count.
    pub fn refreshed(&self, source_type: SourceType, filename: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            source_type,
            path: self.path.clone(),
            filename: filename.into(),
            processed: false,
            processed_at: None,
            ideas_extracted: self.ideas_extracted,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// Record a successful extraction
    pub fn mark_processed(&mut self, ideas_extracted: usize) {
        let now = Utc::now();
        self.processed = true;
        self.processed_at = Some(now);
        self.ideas_extracted = ideas_extracted;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovered_is_pending() {
        let source = Source::discovered(SourceType::Skype, "/data/skype/export.json", "export.json");
        assert!(!source.processed);
        assert!(source.processed_at.is_none());
        assert_eq!(source.ideas_extracted, 0);
        assert_eq!(source.created_at, source.updated_at);
    }

    #[test]
    fn test_refreshed_keeps_identity() {
        let mut original = Source::discovered(SourceType::IMessage, "/data/a.html", "a.html");
        original.ideas_extracted = 3;

        let refreshed = original.refreshed(SourceType::IMessage, "a.html");
        assert_eq!(refreshed.id, original.id);
        assert_eq!(refreshed.created_at, original.created_at);
        assert_eq!(refreshed.ideas_extracted, 3);
        assert!(!refreshed.processed);
    }

    #[test]
    fn test_mark_processed() {
        let mut source = Source::discovered(SourceType::AppleNote, "/notes/n.md", "n.md");
        source.mark_processed(2);
        assert!(source.processed);
        assert_eq!(source.ideas_extracted, 2);
        assert_eq!(source.processed_at, Some(source.updated_at));
    }

    #[test]
    fn test_json_shape() {
        let source = Source::discovered(SourceType::AppleNote, "/notes/n.md", "n.md");
        let value = serde_json::to_value(&source).unwrap();

        assert_eq!(value["type"], "AppleNote");
        assert_eq!(value["ideasExtracted"], 0);
        assert!(value.get("processedAt").is_none());
        assert!(value["createdAt"].is_string());
    }
}
