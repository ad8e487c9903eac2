//! Skype JSON export parser
//!
//! A Skype export holds the exporting user's id and a list of
//! conversations, each with a display name and a `MessageList`. Only
//! text messages (`RichText` and `Text`) are kept.

use crate::discovery::{list_files, read_file};
use crate::error::ParserError;
use crate::timestamp::parse_timestamp;
use ideaminer_domain::{Conversation, Message, SourceType, SELF_RECIPIENT};
use serde::Deserialize;
use std::path::Path;

/// Message types carrying user-written text
const TEXT_MESSAGE_TYPES: &[&str] = &["RichText", "Text"];

#[derive(Debug, Deserialize)]
struct SkypeExport {
    #[serde(rename = "userId", default)]
    user_id: Option<String>,

    #[serde(default)]
    conversations: Option<Vec<SkypeConversation>>,
}

#[derive(Debug, Deserialize)]
struct SkypeConversation {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,

    #[serde(rename = "MessageList", default)]
    message_list: Option<Vec<SkypeMessage>>,
}

#[derive(Debug, Deserialize)]
struct SkypeMessage {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,

    #[serde(default)]
    from: Option<String>,

    #[serde(default)]
    content: Option<String>,

    #[serde(default)]
    messagetype: Option<String>,

    #[serde(default)]
    originalarrivaltime: Option<String>,
}

/// List the Skype export files in `dir`
pub async fn discover(dir: &Path) -> Result<Vec<String>, ParserError> {
    list_files(dir, SourceType::Skype.extension()).await
}

/// Parse one Skype export file
pub async fn parse_file(path: &Path) -> Result<Conversation, ParserError> {
    let json = read_file(path).await?;
    let export: SkypeExport = serde_json::from_str(&json).map_err(|e| ParserError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(conversation_from_export(export))
}

/// Parse Skype export JSON held in memory
pub fn parse_str(json: &str) -> Result<Conversation, serde_json::Error> {
    let export: SkypeExport = serde_json::from_str(json)?;
    Ok(conversation_from_export(export))
}

fn conversation_from_export(export: SkypeExport) -> Conversation {
    let user_id = export.user_id.unwrap_or_default();

    let mut participants: Vec<String> = Vec::new();
    let mut messages = Vec::new();

    for conversation in export.conversations.unwrap_or_default() {
        let display_name = conversation.display_name.filter(|n| !n.is_empty());
        if let Some(name) = &display_name {
            if !participants.contains(name) {
                participants.push(name.clone());
            }
        }

        for msg in conversation.message_list.unwrap_or_default() {
            let is_text = msg
                .messagetype
                .as_deref()
                .is_some_and(|t| TEXT_MESSAGE_TYPES.contains(&t));
            if !is_text {
                continue;
            }

            let from = msg.from.unwrap_or_default();
            let is_from_me = !user_id.is_empty() && from == user_id;
            let sender = msg
                .display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| from.clone());
            let recipient = if is_from_me {
                display_name.clone().unwrap_or_default()
            } else {
                SELF_RECIPIENT.to_string()
            };

            messages.push(Message {
                sender,
                recipient,
                timestamp: parse_timestamp(msg.originalarrivaltime.as_deref().unwrap_or_default()),
                content: msg.content.unwrap_or_default(),
                is_from_me,
                has_attachment: false,
                attachment_path: None,
            });
        }
    }

    Conversation::new(participants, messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "userId": "8:live:me",
        "exportDate": "2024-01-01T00:00:00Z",
        "conversations": [
            {
                "id": "8:live:dana",
                "displayName": "Dana",
                "MessageList": [
                    {
                        "id": "2",
                        "displayName": null,
                        "originalarrivaltime": "2023-05-01T10:05:00.000Z",
                        "messagetype": "RichText",
                        "content": "Sounds good, a tool for freelancers invoicing",
                        "conversationid": "8:live:dana",
                        "from": "8:live:me"
                    },
                    {
                        "id": "1",
                        "displayName": "Dana",
                        "originalarrivaltime": "2023-05-01T10:00:00.000Z",
                        "messagetype": "Text",
                        "content": "What should we build?",
                        "conversationid": "8:live:dana",
                        "from": "8:live:dana"
                    },
                    {
                        "id": "3",
                        "displayName": "Dana",
                        "originalarrivaltime": "2023-05-01T10:06:00.000Z",
                        "messagetype": "Event/Call",
                        "content": "<partlist/>",
                        "conversationid": "8:live:dana",
                        "from": "8:live:dana"
                    }
                ]
            },
            {
                "id": "19:group",
                "displayName": null,
                "MessageList": []
            }
        ]
    }"#;

    #[test]
    fn test_keeps_only_text_messages_sorted() {
        let conversation = parse_str(EXPORT).unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].content, "What should we build?");
        assert_eq!(conversation.messages[1].sender, "8:live:me");
    }

    #[test]
    fn test_from_me_and_sender_fallback() {
        let conversation = parse_str(EXPORT).unwrap();

        let dana = &conversation.messages[0];
        assert_eq!(dana.sender, "Dana");
        assert!(!dana.is_from_me);
        assert_eq!(dana.recipient, SELF_RECIPIENT);

        let mine = &conversation.messages[1];
        assert!(mine.is_from_me);
        assert_eq!(mine.recipient, "Dana");
    }

    #[test]
    fn test_participants_are_display_names() {
        let conversation = parse_str(EXPORT).unwrap();
        assert_eq!(conversation.participants, vec!["Dana".to_string()]);
    }

    #[test]
    fn test_missing_conversations_is_empty() {
        let conversation = parse_str(r#"{"userId": "me"}"#).unwrap();
        assert!(conversation.is_empty());
        assert!(conversation.participants.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(parse_str("{not json").is_err());
    }

    #[tokio::test]
    async fn test_parse_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = parse_file(&path).await.unwrap_err();
        assert!(matches!(err, ParserError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
