//! Parser output: messages, conversations and notes
//!
//! These types are ephemeral. They are rebuilt from the export files on
//! every run and never persisted.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Recipient recorded for messages received by the exporting user
pub const SELF_RECIPIENT: &str = "Me";

/// A single chat message from an iMessage or Skype export
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Display name or identifier of the sender
    pub sender: String,

    /// Recipient, [`SELF_RECIPIENT`] when the exporting user received it
    pub recipient: String,

    /// When the message was sent
    pub timestamp: DateTime<Utc>,

    /// Message text
    pub content: String,

    /// Whether the exporting user sent this message
    pub is_from_me: bool,

    /// Whether the message carried an attachment
    pub has_attachment: bool,

    /// Location of the attachment, when the export references one
    pub attachment_path: Option<String>,
}

/// Participants and messages parsed from one conversation file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    /// Conversation participants, without duplicates
    pub participants: Vec<String>,

    /// Messages sorted ascending by timestamp
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Build a conversation, sorting messages by timestamp
    pub fn new(participants: Vec<String>, mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| m.timestamp);
        Self {
            participants,
            messages,
        }
    }

    /// Whether the conversation has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Timestamp of the earliest message
    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.messages.first().map(|m| m.timestamp)
    }

    /// Flatten to one `"<sender>: <content>"` line per message
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use ideaminer_domain::{Conversation, Message};
    ///
    /// let msg = |sender: &str, content: &str| Message {
    ///     sender: sender.to_string(),
    ///     recipient: "Me".to_string(),
    ///     timestamp: Utc::now(),
    ///     content: content.to_string(),
    ///     is_from_me: false,
    ///     has_attachment: false,
    ///     attachment_path: None,
    /// };
    ///
    /// let conversation = Conversation::new(vec![], vec![msg("alice", "hi"), msg("bob", "hey")]);
    /// assert_eq!(conversation.to_transcript(), "alice: hi\nbob: hey");
    /// ```
    pub fn to_transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.sender, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A note parsed from an Apple Notes markdown export
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    /// Note title, taken from the filename
    pub title: String,

    /// Raw markdown content
    pub content: String,

    /// Creation date, taken from the filename when present
    pub created_at: DateTime<Utc>,

    /// Path of the note file
    pub filepath: PathBuf,
}
