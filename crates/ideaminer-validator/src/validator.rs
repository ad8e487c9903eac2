//! Idea store validation logic

use crate::ValidatorError;
use ideaminer_domain::normalize_title;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

/// The fields of an idea shown when reporting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaSummary {
    /// Idea id, if present
    pub id: Option<String>,
    /// Title as stored
    pub title: String,
    /// Source type as stored
    pub source_type: String,
    /// Creation time as stored
    pub created_at: String,
}

impl IdeaSummary {
    fn from_value(value: &Value) -> Self {
        Self {
            id: id_of(value),
            title: string_field(value, "title"),
            source_type: string_field(value, "sourceType"),
            created_at: string_field(value, "createdAt"),
        }
    }
}

/// Ideas sharing a key (an id or a normalized title)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Shared key
    pub key: String,
    /// Every idea with that key, in file order
    pub occurrences: Vec<IdeaSummary>,
}

impl DuplicateGroup {
    /// Number of ideas sharing the key
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// No problems found
    Passed,

    /// Passed, but some titles repeat
    PassedWithWarnings,

    /// Ids are missing or duplicated
    Failed,
}

/// Findings for one store file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of entries in the `ideas` array
    pub idea_count: usize,

    /// Ideas without an id
    pub missing_ids: Vec<IdeaSummary>,

    /// Ids used by more than one idea
    pub duplicate_ids: Vec<DuplicateGroup>,

    /// Normalized titles used by more than one idea
    pub duplicate_titles: Vec<DuplicateGroup>,
}

impl ValidationReport {
    /// Whether the file passes validation
    ///
    /// Duplicate titles are warnings and do not fail validation.
    pub fn passed(&self) -> bool {
        self.missing_ids.is_empty() && self.duplicate_ids.is_empty()
    }

    /// Overall verdict
    pub fn status(&self) -> ValidationStatus {
        if !self.passed() {
            ValidationStatus::Failed
        } else if !self.duplicate_titles.is_empty() {
            ValidationStatus::PassedWithWarnings
        } else {
            ValidationStatus::Passed
        }
    }

    /// Emit the findings through `tracing`
    pub fn log_report(&self) {
        info!("Found {} ideas in the file", self.idea_count);

        for idea in &self.missing_ids {
            error!("Found idea without ID (title: {:?})", idea.title);
        }

        if !self.duplicate_ids.is_empty() {
            error!("Found {} duplicate IDs:", self.duplicate_ids.len());
            for group in &self.duplicate_ids {
                error!("  ID: {} appears {} times", group.key, group.count());
                for (idx, idea) in group.occurrences.iter().enumerate() {
                    error!(
                        "    {}. Title: {:?}, Source: {}, Created: {}",
                        idx + 1,
                        idea.title,
                        idea.source_type,
                        idea.created_at
                    );
                }
            }
        }

        if !self.duplicate_titles.is_empty() {
            warn!(
                "Found {} ideas with duplicate titles but different IDs:",
                self.duplicate_titles.len()
            );
            for group in &self.duplicate_titles {
                warn!("  Title: {:?} appears {} times", group.key, group.count());
                for (idx, idea) in group.occurrences.iter().enumerate() {
                    warn!(
                        "    {}. ID: {}, Source: {}, Created: {}",
                        idx + 1,
                        idea.id.as_deref().unwrap_or("<none>"),
                        idea.source_type,
                        idea.created_at
                    );
                }
            }
        }

        if self.passed() {
            info!("Validation successful! No duplicate IDs found.");
        }
    }
}

/// Validate the store file at `path`
pub async fn validate_file(path: impl AsRef<Path>) -> Result<ValidationReport, ValidatorError> {
    let path = path.as_ref();
    info!("Validating ideas in: {}", path.display());

    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidatorError::NotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ValidatorError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let value: Value = serde_json::from_str(&json).map_err(|e| ValidatorError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_value(&value)
}

/// Validate an already parsed store document
pub fn validate_value(document: &Value) -> Result<ValidationReport, ValidatorError> {
    let ideas = document
        .get("ideas")
        .and_then(Value::as_array)
        .ok_or(ValidatorError::MissingIdeas)?;

    let mut report = ValidationReport {
        idea_count: ideas.len(),
        ..Default::default()
    };

    let mut by_id = Grouping::default();
    let mut by_title = Grouping::default();

    for value in ideas {
        let summary = IdeaSummary::from_value(value);

        match &summary.id {
            Some(id) => by_id.add(id.clone(), summary.clone()),
            None => report.missing_ids.push(summary.clone()),
        }

        by_title.add(normalize_title(&summary.title), summary);
    }

    report.duplicate_ids = by_id.duplicates();
    report.duplicate_titles = by_title.duplicates();

    Ok(report)
}

/// Groups summaries by key, remembering first-seen key order
#[derive(Default)]
struct Grouping {
    order: Vec<String>,
    groups: HashMap<String, Vec<IdeaSummary>>,
}

impl Grouping {
    fn add(&mut self, key: String, summary: IdeaSummary) {
        let group = self.groups.entry(key.clone()).or_default();
        if group.is_empty() {
            self.order.push(key);
        }
        group.push(summary);
    }

    fn duplicates(self) -> Vec<DuplicateGroup> {
        let Grouping { order, mut groups } = self;
        order
            .into_iter()
            .filter_map(|key| {
                let occurrences = groups.remove(&key)?;
                (occurrences.len() > 1).then_some(DuplicateGroup { key, occurrences })
            })
            .collect()
    }
}

fn id_of(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
