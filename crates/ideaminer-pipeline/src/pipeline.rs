//! Core pipeline implementation

use crate::config::PipelineConfig;
use crate::describe::describe_source;
use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use ideaminer_domain::{Conversation, Idea, RecordId, Source, SourceType};
use ideaminer_extractor::{IdeaCandidate, IdeaExtractor};
use ideaminer_llm::CompletionProvider;
use ideaminer_parsers::{apple_notes, imessage, skype, ParserError};
use ideaminer_store::{IdeaStore, JsonStore};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Everything a run accumulates: all ideas and all source records
pub type PipelineState = IdeaStore;

/// Aggregate figures for a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Source records in the store
    pub total_sources: usize,

    /// Sources extracted during this run
    pub sources_processed: usize,

    /// Sources still pending after this run
    pub sources_pending: usize,

    /// Ideas in the store
    pub total_ideas: usize,

    /// Ideas added by this run
    pub new_ideas: usize,

    /// Mean confidence over all ideas (0 when there are none)
    pub average_confidence: f64,

    /// Wall time of the run
    pub elapsed: Duration,
}

/// Final state and figures of a run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// State as written by the final checkpoint
    pub state: PipelineState,

    /// Aggregate figures
    pub stats: RunStats,
}

/// Text obtained from one source file, ready for extraction
struct SourceText {
    body: String,
    timestamp: DateTime<Utc>,
    participants: Option<Vec<String>>,
}

/// Files found for one source kind
struct Discovered {
    source_type: SourceType,
    dir: PathBuf,
    files: Vec<String>,
}

/// The Pipeline runs extraction over every configured export directory
pub struct Pipeline<P: CompletionProvider> {
    config: PipelineConfig,
    extractor: IdeaExtractor<P>,
    store: JsonStore,
}

impl<P: CompletionProvider> Pipeline<P> {
    /// Create a new Pipeline
    ///
    /// Configured paths are resolved against the working directory, so
    /// stored source paths are always absolute.
    pub fn new(config: PipelineConfig, provider: P) -> Result<Self, PipelineError> {
        config.validate()?;
        let config = config.into_absolute()?;
        let extractor = IdeaExtractor::new(provider, config.extractor.clone());
        let store = JsonStore::new(config.output_file.clone());
        Ok(Self {
            config,
            extractor,
            store,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run extraction over all configured directories
    ///
    /// # Errors
    ///
    /// Fails only when the model is not ready, the store cannot be loaded,
    /// a directory cannot be listed, or the final checkpoint fails.
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        let started = Instant::now();

        let status = self.extractor.check_status(&self.config.model).await;
        if !status.is_ready() {
            return Err(PipelineError::NotReady(status.error.unwrap_or_else(|| {
                format!("Model {} is not available", self.config.model)
            })));
        }

        let discovered = self.discover_all().await?;

        let mut state = self.store.load().await?;
        info!(
            "Loaded {} existing ideas and {} sources from {}",
            state.ideas.len(),
            state.sources.len(),
            self.store.path().display()
        );
        let ideas_before = state.ideas.len();

        let (sources, discovered_count) = plan_sources(std::mem::take(&mut state.sources), &discovered);
        state.sources = sources;

        let mut sources_processed = 0;
        for kind in SourceType::ALL {
            let pending: Vec<usize> = (0..discovered_count)
                .filter(|&idx| {
                    let source = &state.sources[idx];
                    source.source_type == kind && !source.processed
                })
                .collect();
            info!(
                "Found {} unprocessed {} sources to extract ideas from",
                pending.len(),
                kind
            );

            for idx in pending {
                if self.process_source(&mut state, idx).await {
                    sources_processed += 1;
                }
            }
        }

        self.store.checkpoint(&state).await?;

        let sources_pending = state.sources.iter().filter(|s| !s.processed).count();
        let stats = RunStats {
            total_sources: state.sources.len(),
            sources_processed,
            sources_pending,
            total_ideas: state.ideas.len(),
            new_ideas: state.ideas.len().saturating_sub(ideas_before),
            average_confidence: state.average_confidence(),
            elapsed: started.elapsed(),
        };

        Ok(RunOutcome { state, stats })
    }

    /// List the files of every configured kind
    async fn discover_all(&self) -> Result<Vec<Discovered>, PipelineError> {
        let dirs = [
            (SourceType::IMessage, &self.config.imessage_dir),
            (SourceType::AppleNote, &self.config.apple_notes_dir),
            (SourceType::Skype, &self.config.skype_dir),
        ];

        let mut discovered = Vec::new();
        for (source_type, dir) in dirs {
            let Some(dir) = dir else {
                info!("Skipping {} extraction", source_type);
                continue;
            };

            info!("Processing {} files from {}...", source_type, dir.display());
            let files = match discover(source_type, dir).await {
                Ok(files) => files,
                Err(e) if e.is_not_found() => {
                    warn!("Directory {} does not exist, skipping", dir.display());
                    Vec::new()
                }
                Err(e) => return Err(e.into()),
            };
            debug!("Found {} {} files", files.len(), source_type);

            discovered.push(Discovered {
                source_type,
                dir: dir.clone(),
                files,
            });
        }

        Ok(discovered)
    }

    /// Extract one pending source and checkpoint
    ///
    /// Returns whether the source was marked processed. Failures are logged
    /// and leave the source pending.
    async fn process_source(&self, state: &mut PipelineState, idx: usize) -> bool {
        let source = state.sources[idx].clone();
        let description = match source.source_type {
            SourceType::AppleNote => source.filename.clone(),
            SourceType::IMessage | SourceType::Skype => describe_source(&source.filename),
        };
        info!("Extracting ideas from {}...", description);

        let ideas = match self.extract_source(&source).await {
            Ok(Some(ideas)) => ideas,
            Ok(None) => {
                info!("No text found in {}", description);
                return false;
            }
            Err(e) => {
                error!("Error processing {}: {}", description, e);
                return false;
            }
        };

        let count = ideas.len();
        state.ideas.extend(ideas);
        state.sources[idx].mark_processed(count);
        info!("Found {} ideas in {}", count, description);

        if let Err(e) = self.store.checkpoint(state).await {
            error!("Failed to save progress after {}: {}", description, e);
        }
        true
    }

    /// Parse a source and turn its text into ideas
    ///
    /// `None` when the file has no usable text.
    async fn extract_source(&self, source: &Source) -> Result<Option<Vec<Idea>>, PipelineError> {
        let Some(text) = load_text(source).await? else {
            return Ok(None);
        };

        let candidates = self.extractor.extract(&text.body, &self.config.model).await?;
        let ideas = candidates
            .into_iter()
            .map(|candidate| materialize(candidate, source, &text, self.config.context_chars))
            .collect();

        Ok(Some(ideas))
    }
}

/// List the files of one kind in `dir`
async fn discover(source_type: SourceType, dir: &Path) -> Result<Vec<String>, ParserError> {
    match source_type {
        SourceType::IMessage => imessage::discover(dir).await,
        SourceType::AppleNote => apple_notes::discover(dir).await,
        SourceType::Skype => skype::discover(dir).await,
    }
}

/// Build the run's source list
///
/// Discovered files come first, in discovery order. Processed records are
/// reused as-is; anything else becomes (or is refreshed to) pending.
/// Previously stored records whose file was not found this time follow,
/// untouched. Returns the list and the number of discovered entries.
fn plan_sources(previous: Vec<Source>, discovered: &[Discovered]) -> (Vec<Source>, usize) {
    let index: HashMap<String, usize> = previous
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.path.clone(), idx))
        .collect();
    let mut previous: Vec<Option<Source>> = previous.into_iter().map(Some).collect();

    let mut sources = Vec::new();
    for group in discovered {
        for file in &group.files {
            let path = group.dir.join(file).to_string_lossy().into_owned();
            let existing = index.get(&path).and_then(|&idx| previous[idx].take());

            let source = match existing {
                Some(existing) if existing.processed => {
                    info!("Skipping already processed {} file: {}", group.source_type, file);
                    existing
                }
                Some(existing) => existing.refreshed(group.source_type, file.as_str()),
                None => Source::discovered(group.source_type, path, file.as_str()),
            };
            sources.push(source);
        }
    }

    let discovered_count = sources.len();
    sources.extend(previous.into_iter().flatten());
    (sources, discovered_count)
}

/// Read a source file back and flatten it to extraction text
async fn load_text(source: &Source) -> Result<Option<SourceText>, ParserError> {
    let path = Path::new(&source.path);

    match source.source_type {
        SourceType::IMessage => Ok(conversation_text(imessage::parse_file(path).await?)),
        SourceType::Skype => Ok(conversation_text(skype::parse_file(path).await?)),
        SourceType::AppleNote => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let notes = apple_notes::scan_directory(dir).await?;
            Ok(notes
                .notes
                .into_iter()
                .find(|note| note.filepath == path)
                .map(|note| SourceText {
                    body: note.content,
                    timestamp: note.created_at,
                    participants: None,
                }))
        }
    }
}

fn conversation_text(conversation: Conversation) -> Option<SourceText> {
    let timestamp = conversation.first_timestamp()?;
    Some(SourceText {
        body: conversation.to_transcript(),
        timestamp,
        participants: Some(conversation.participants),
    })
}

/// Turn a model candidate into a stored idea
fn materialize(
    candidate: IdeaCandidate,
    source: &Source,
    text: &SourceText,
    context_chars: usize,
) -> Idea {
    let now = Utc::now();
    let participants = if source.source_type.has_participants() {
        text.participants.clone()
    } else {
        None
    };

    Idea {
        id: RecordId::new(),
        title: candidate.title,
        description: candidate.description,
        problem: candidate.problem,
        target_audience: candidate.target_audience,
        confidence_score: candidate.confidence_score,
        reasoning: candidate.reasoning,
        source_file: source.path.clone(),
        source_type: source.source_type,
        timestamp: text.timestamp,
        participants,
        context: Some(context_excerpt(&text.body, context_chars)),
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn context_excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovered(source_type: SourceType, dir: &str, files: &[&str]) -> Discovered {
        Discovered {
            source_type,
            dir: PathBuf::from(dir),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_context_excerpt() {
        assert_eq!(context_excerpt("short", 500), "short");
        assert_eq!(context_excerpt("abcdef", 3), "abc...");
        assert_eq!(context_excerpt("abc", 3), "abc");
        assert_eq!(context_excerpt("héllo", 2), "hé...");
    }

    #[test]
    fn test_plan_new_sources() {
        let (sources, count) = plan_sources(
            Vec::new(),
            &[
                discovered(SourceType::IMessage, "/im", &["a.html"]),
                discovered(SourceType::AppleNote, "/notes", &["n.md"]),
            ],
        );

        assert_eq!(count, 2);
        assert_eq!(sources[0].path, "/im/a.html");
        assert_eq!(sources[0].source_type, SourceType::IMessage);
        assert_eq!(sources[1].filename, "n.md");
        assert!(sources.iter().all(|s| !s.processed));
    }

    #[test]
    fn test_plan_reuses_processed_and_refreshes_pending() {
        let mut done = Source::discovered(SourceType::IMessage, "/im/a.html", "a.html");
        done.mark_processed(3);
        let mut pending = Source::discovered(SourceType::IMessage, "/im/b.html", "b.html");
        pending.ideas_extracted = 2;
        let gone = Source::discovered(SourceType::Skype, "/sk/old.json", "old.json");

        let (sources, count) = plan_sources(
            vec![done.clone(), pending.clone(), gone.clone()],
            &[discovered(SourceType::IMessage, "/im", &["a.html", "b.html", "c.html"])],
        );

        assert_eq!(count, 3);
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0], done);
        assert_eq!(sources[1].id, pending.id);
        assert_eq!(sources[1].created_at, pending.created_at);
        assert_eq!(sources[1].ideas_extracted, 2);
        assert!(!sources[1].processed);
        assert_eq!(sources[2].path, "/im/c.html");
        assert_eq!(sources[3], gone);
    }

    #[test]
    fn test_materialize_note_has_no_participants() {
        let source = Source::discovered(SourceType::AppleNote, "/n/a.md", "a.md");
        let text = SourceText {
            body: "x".repeat(600),
            timestamp: Utc::now(),
            participants: Some(vec!["ignored".to_string()]),
        };
        let candidate = IdeaCandidate {
            title: "T".to_string(),
            description: String::new(),
            problem: String::new(),
            target_audience: String::new(),
            confidence_score: 5,
            reasoning: None,
        };

        let idea = materialize(candidate, &source, &text, 500);
        assert!(idea.participants.is_none());
        assert_eq!(idea.context.as_deref().map(str::len), Some(503));
        assert_eq!(idea.timestamp, text.timestamp);
        assert_eq!(idea.source_file, "/n/a.md");
        assert!(idea.tags.is_empty());
    }
}
