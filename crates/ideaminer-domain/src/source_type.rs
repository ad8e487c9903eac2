//! Supported export formats

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of export an input file comes from
///
/// The set is closed: each variant has exactly one parser, selected by a
/// single match in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// iMessage conversation exported as HTML
    #[serde(rename = "iMessage")]
    IMessage,

    /// Apple Notes note exported as markdown
    #[serde(rename = "AppleNote")]
    AppleNote,

    /// Skype JSON export
    #[serde(rename = "Skype")]
    Skype,
}

impl SourceType {
    /// All source types in pipeline processing order
    pub const ALL: [SourceType; 3] = [SourceType::IMessage, SourceType::AppleNote, SourceType::Skype];

    /// Persisted name of the source type
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::IMessage => "iMessage",
            SourceType::AppleNote => "AppleNote",
            SourceType::Skype => "Skype",
        }
    }

    /// File extension (without the dot) recognized for this source type
    pub fn extension(&self) -> &'static str {
        match self {
            SourceType::IMessage => "html",
            SourceType::AppleNote => "md",
            SourceType::Skype => "json",
        }
    }

    /// Whether ideas from this source carry a participant list
    pub fn has_participants(&self) -> bool {
        !matches!(self, SourceType::AppleNote)
    }

    /// Parse a source type from its persisted name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "iMessage" => Some(SourceType::IMessage),
            "AppleNote" => Some(SourceType::AppleNote),
            "Skype" => Some(SourceType::Skype),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&SourceType::IMessage).unwrap(), "\"iMessage\"");
        assert_eq!(serde_json::to_string(&SourceType::AppleNote).unwrap(), "\"AppleNote\"");
        assert_eq!(serde_json::to_string(&SourceType::Skype).unwrap(), "\"Skype\"");

        let parsed: SourceType = serde_json::from_str("\"AppleNote\"").unwrap();
        assert_eq!(parsed, SourceType::AppleNote);
    }

    #[test]
    fn test_parse_matches_as_str() {
        for source_type in SourceType::ALL {
            assert_eq!(SourceType::parse(source_type.as_str()), Some(source_type));
        }
        assert!("imessage".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_extensions() {
        assert_eq!(SourceType::IMessage.extension(), "html");
        assert_eq!(SourceType::AppleNote.extension(), "md");
        assert_eq!(SourceType::Skype.extension(), "json");
    }

    #[test]
    fn test_participants_only_for_conversations() {
        assert!(SourceType::IMessage.has_participants());
        assert!(SourceType::Skype.has_participants());
        assert!(!SourceType::AppleNote.has_participants());
    }
}
