//! iMessage HTML export parser
//!
//! Exports come in two layouts. Newer exports wrap each message in a
//! `.message` container (`.sent` when outgoing) holding `span.sender`,
//! `span.timestamp` and one or more `.message_part` elements with a
//! `span.bubble`. Older exports use a flat `.message` element with
//! `.sender`, `.time`/`.timestamp` and `.text`/`.bubble` children and a
//! `from-me` class on outgoing messages.
//!
//! Both participants and messages are found by trying a list of strategies
//! in priority order; the first one that matches wins.

use crate::discovery::{file_stem, list_files, read_file};
use crate::error::ParserError;
use crate::timestamp::parse_timestamp;
use chrono::Utc;
use ideaminer_domain::{Conversation, Message, SourceType, SELF_RECIPIENT};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, error};

/// Sender recorded when the export does not name one
const UNKNOWN_SENDER: &str = "Unknown";

static CHAT_WITH_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chat_with_(.+)").expect("valid filename pattern"));

static CHAT_WITH_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chat with (.+)").expect("valid header pattern"));

/// A participant strategy inspects the filename and document
type ParticipantStrategy = fn(&str, &Html) -> Result<Option<Vec<String>>, ParserError>;

/// A message strategy returns `None` when its layout is not present
type MessageStrategy = fn(&Html, &[String]) -> Result<Option<Vec<Message>>, ParserError>;

const PARTICIPANT_STRATEGIES: &[(&str, ParticipantStrategy)] = &[
    ("phone_number_filename", participants_from_phone_filename),
    ("chat_with_filename", participants_from_chat_with_filename),
    ("header", participants_from_header),
];

const MESSAGE_STRATEGIES: &[(&str, MessageStrategy)] = &[
    ("message_part", messages_from_parts),
    ("flat_message", messages_from_flat_layout),
];

/// Messages merged from every file in an export directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryExport {
    /// Recognized file names, in discovery order
    pub files: Vec<String>,

    /// Union of participants and all messages sorted by timestamp
    pub conversation: Conversation,
}

/// List the iMessage export files in `dir`
pub async fn discover(dir: &Path) -> Result<Vec<String>, ParserError> {
    list_files(dir, SourceType::IMessage.extension()).await
}

/// Parse one iMessage export file
pub async fn parse_file(path: &Path) -> Result<Conversation, ParserError> {
    let html = read_file(path).await?;
    parse_html(&file_stem(path), &html)
}

/// Parse iMessage export markup
///
/// `file_stem` is the export's file name without extension; it often
/// encodes the participants.
pub fn parse_html(file_stem: &str, html: &str) -> Result<Conversation, ParserError> {
    let document = Html::parse_document(html);

    let mut participants = Vec::new();
    for (name, strategy) in PARTICIPANT_STRATEGIES {
        if let Some(found) = strategy(file_stem, &document)? {
            debug!("Participants for '{}' found by {} strategy", file_stem, name);
            participants = found;
            break;
        }
    }

    let mut messages = Vec::new();
    for (name, strategy) in MESSAGE_STRATEGIES {
        if let Some(found) = strategy(&document, &participants)? {
            debug!("{} messages in '{}' found by {} strategy", found.len(), file_stem, name);
            messages = found;
            break;
        }
    }

    Ok(Conversation::new(participants, messages))
}

/// Parse every export file in `dir`, merging the results
///
/// Files that fail to parse are logged and skipped.
pub async fn scan_directory(dir: &Path) -> Result<DirectoryExport, ParserError> {
    let files = discover(dir).await?;

    let mut participants: Vec<String> = Vec::new();
    let mut messages = Vec::new();
    for file in &files {
        match parse_file(&dir.join(file)).await {
            Ok(conversation) => {
                for participant in conversation.participants {
                    if !participants.contains(&participant) {
                        participants.push(participant);
                    }
                }
                messages.extend(conversation.messages);
            }
            Err(e) => error!("Error processing file {}: {}", file, e),
        }
    }

    Ok(DirectoryExport {
        files,
        conversation: Conversation::new(participants, messages),
    })
}

fn participants_from_phone_filename(
    file_stem: &str,
    _document: &Html,
) -> Result<Option<Vec<String>>, ParserError> {
    if file_stem.contains('+') {
        return Ok(Some(vec![file_stem.to_string()]));
    }
    Ok(None)
}

fn participants_from_chat_with_filename(
    file_stem: &str,
    _document: &Html,
) -> Result<Option<Vec<String>>, ParserError> {
    let names = CHAT_WITH_FILENAME
        .captures(file_stem)
        .and_then(|caps| caps.get(1))
        .map(|m| split_names(m.as_str(), "_and_"));
    Ok(names)
}

fn participants_from_header(
    _file_stem: &str,
    document: &Html,
) -> Result<Option<Vec<String>>, ParserError> {
    let header = selector("header h1")?;
    let Some(element) = document.select(&header).next() else {
        return Ok(None);
    };

    let text = element_text(element);
    let names = CHAT_WITH_HEADER
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| split_names(m.as_str(), " and "));
    Ok(names)
}

fn messages_from_parts(
    document: &Html,
    participants: &[String],
) -> Result<Option<Vec<Message>>, ParserError> {
    let part_selector = selector(".message_part")?;
    let parts: Vec<ElementRef> = document.select(&part_selector).collect();
    if parts.is_empty() {
        return Ok(None);
    }

    let sender_selector = selector("span.sender")?;
    let timestamp_selector = selector("span.timestamp")?;
    let bubble_selector = selector("span.bubble")?;
    let image_selector = selector("img")?;

    let mut messages = Vec::new();
    for part in parts {
        let Some(container) = nearest_with_class(part, "message") else {
            continue;
        };
        let is_from_me = has_class(container, "sent");

        let sender = container
            .select(&sender_selector)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SENDER.to_string());

        let timestamp = container
            .select(&timestamp_selector)
            .next()
            .map(|el| parse_timestamp(&element_text(el)))
            .unwrap_or_else(Utc::now);

        let content = match part.select(&bubble_selector).next() {
            Some(bubble) => element_text(bubble),
            None => element_text(part),
        };

        let attachment = part.select(&image_selector).next();
        let attachment_path = attachment.and_then(|img| img.value().attr("src").map(str::to_string));

        messages.push(Message {
            sender,
            recipient: recipient_for(is_from_me, participants),
            timestamp,
            content,
            is_from_me,
            has_attachment: attachment.is_some(),
            attachment_path,
        });
    }

    Ok(Some(messages))
}

fn messages_from_flat_layout(
    document: &Html,
    participants: &[String],
) -> Result<Option<Vec<Message>>, ParserError> {
    let message_selector = selector(".message")?;
    let sender_selector = selector(".sender")?;
    let time_selector = selector(".time")?;
    let timestamp_selector = selector(".timestamp")?;
    let text_selector = selector(".text")?;
    let bubble_selector = selector(".bubble")?;
    let attachment_selector = selector(".attachment")?;

    let mut messages = Vec::new();
    for element in document.select(&message_selector) {
        let sender = element.select(&sender_selector).next();
        let time = element
            .select(&time_selector)
            .next()
            .or_else(|| element.select(&timestamp_selector).next());
        let text = element
            .select(&text_selector)
            .next()
            .or_else(|| element.select(&bubble_selector).next());

        let (Some(sender), Some(time), Some(text)) = (sender, time, text) else {
            continue;
        };

        let is_from_me = has_class(element, "from-me");
        let attachment = element.select(&attachment_selector).next();
        let sender = element_text(sender);

        messages.push(Message {
            sender: if sender.is_empty() {
                UNKNOWN_SENDER.to_string()
            } else {
                sender
            },
            recipient: recipient_for(is_from_me, participants),
            timestamp: parse_timestamp(&element_text(time)),
            content: element_text(text),
            is_from_me,
            has_attachment: attachment.is_some(),
            attachment_path: attachment.and_then(|a| a.value().attr("src").map(str::to_string)),
        });
    }

    Ok(Some(messages))
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(format!("{}: {}", css, e)))
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// The element itself or its closest ancestor carrying `class`
fn nearest_with_class<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| has_class(*el, class))
}

fn recipient_for(is_from_me: bool, participants: &[String]) -> String {
    if is_from_me {
        participants.first().cloned().unwrap_or_default()
    } else {
        SELF_RECIPIENT.to_string()
    }
}

fn split_names(names: &str, separator: &str) -> Vec<String> {
    names
        .split(separator)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect()
}
