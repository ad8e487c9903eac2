//! Parse LLM output into idea candidates
//!
//! Model replies are untrusted free text. The first JSON array of objects
//! found in the reply is parsed; everything around it is ignored.

use crate::types::{IdeaCandidate, MIN_CONFIDENCE};
use serde_json::{Map, Value};
use tracing::warn;

/// Outcome of parsing one model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyParse {
    /// A JSON array was found; holds the usable candidates (possibly none)
    Ideas(Vec<IdeaCandidate>),

    /// The reply contains no JSON array of objects
    NoJsonArray,

    /// An array was found but is not valid JSON
    Malformed(String),
}

impl ReplyParse {
    /// Candidates from the reply; anything unusable yields none
    pub fn into_candidates(self) -> Vec<IdeaCandidate> {
        match self {
            ReplyParse::Ideas(ideas) => ideas,
            ReplyParse::NoJsonArray | ReplyParse::Malformed(_) => Vec::new(),
        }
    }
}

/// Parse an LLM reply into idea candidates
pub fn parse_llm_response(response: &str) -> ReplyParse {
    let Some(json_str) = find_json_array(response) else {
        return ReplyParse::NoJsonArray;
    };

    let items: Vec<Value> = match serde_json::from_str(json_str) {
        Ok(items) => items,
        Err(e) => return ReplyParse::Malformed(format!("JSON parse error: {}", e)),
    };

    let mut ideas = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match parse_idea_json(item) {
            Ok(idea) => ideas.push(idea),
            Err(e) => warn!("Skipping idea {}: {}", idx, e),
        }
    }

    ReplyParse::Ideas(ideas)
}

/// Locate the first JSON array of objects in `text`
///
/// Returns the first bracket-balanced `[ ... ]` whose first non-whitespace
/// character after `[` is `{`. Brackets inside string literals are ignored.
pub fn find_json_array(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();

    for (start, &b) in bytes.iter().enumerate() {
        if b != b'[' {
            continue;
        }
        let opens_object = bytes[start + 1..]
            .iter()
            .find(|c| !c.is_ascii_whitespace())
            .is_some_and(|&c| c == b'{');
        if !opens_object {
            continue;
        }
        if let Some(end) = balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
    }

    None
}

/// Index of the bracket closing the one at `start`, if it balances
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (idx, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => stack.push(b']'),
            b'{' => stack.push(b'}'),
            b']' | b'}' => {
                if stack.pop() != Some(b) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}

/// Convert one array element into a candidate
fn parse_idea_json(json: &Value) -> Result<IdeaCandidate, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Idea is not a JSON object".to_string())?;

    let title = text_field(obj, "title")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'title'".to_string())?;

    let confidence_score = match obj.get("confidenceScore").and_then(score_value) {
        Some(score) => IdeaCandidate::clamp_confidence(score),
        None => {
            warn!(
                "Idea '{}' has no usable confidenceScore, using {}",
                title.trim(),
                MIN_CONFIDENCE
            );
            MIN_CONFIDENCE
        }
    };

    Ok(IdeaCandidate {
        title: title.trim().to_string(),
        description: text_field(obj, "description").unwrap_or_default(),
        problem: text_field(obj, "problem").unwrap_or_default(),
        target_audience: text_field(obj, "targetAudience").unwrap_or_default(),
        confidence_score,
        reasoning: text_field(obj, "reasoning"),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn score_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
