//! Lenient timestamp parsing for chat exports
//!
//! Export timestamps are often annotated, e.g.
//! `Mar 02, 2025 10:21:13 AM (Read by you after 20 minutes, 23 seconds)`.
//! The date part is located inside the string and parsed on its own; when
//! nothing usable is found the current time is used and a warning logged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// `<Month> <Day>, <Year> <H>:<MM>:<SS> AM|PM` anywhere in the string
static EXPORT_TIMESTAMP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]+ \d+, \d+ \d+:\d+:\d+ [AP]M").expect("valid timestamp pattern")
});

/// Formats tried against the month-name substring
const MONTH_NAME_FORMATS: &[&str] = &["%b %d, %Y %I:%M:%S %p", "%B %d, %Y %I:%M:%S %p"];

/// Naive formats tried against the whole string, interpreted as local time
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an export timestamp, falling back to now
///
/// Never fails: unparseable input is logged at warn level and mapped to
/// the current time.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    match try_parse_timestamp(raw) {
        Some(ts) => ts,
        None => {
            warn!("Could not parse timestamp: {:?}", raw);
            Utc::now()
        }
    }
}

/// Parse an export timestamp, returning `None` when nothing matches
pub fn try_parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(embedded) = find_export_timestamp(trimmed) {
        if let Some(ts) = parse_month_name(embedded) {
            return Some(ts);
        }
    }

    parse_whole(trimmed)
}

fn find_export_timestamp(s: &str) -> Option<&str> {
    EXPORT_TIMESTAMP_PATTERN.find(s).map(|m| m.as_str())
}

fn parse_month_name(s: &str) -> Option<DateTime<Utc>> {
    MONTH_NAME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(local_to_utc)
}

fn parse_whole(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(ts) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .and_then(local_to_utc)
    {
        return Some(ts);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    parse_month_name(s)
}

/// Export times carry no zone; they are wall-clock times of the exporting machine.
fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
}
