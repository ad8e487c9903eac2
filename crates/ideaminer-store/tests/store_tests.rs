use chrono::Utc;
use ideaminer_domain::{Idea, RecordId, Source, SourceType};
use ideaminer_store::{IdeaStore, JsonStore, StoreError};

fn idea(title: &str, score: u8) -> Idea {
    let now = Utc::now();
    Idea {
        id: RecordId::new(),
        title: title.to_string(),
        description: String::new(),
        problem: String::new(),
        target_audience: String::new(),
        confidence_score: score,
        reasoning: None,
        source_file: "/data/notes/a.md".to_string(),
        source_type: SourceType::AppleNote,
        timestamp: now,
        participants: None,
        context: None,
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_missing_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("ideas.json"));

    let state = store.load().await.unwrap();
    assert_eq!(state, IdeaStore::default());
}

#[tokio::test]
async fn test_checkpoint_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("nested").join("ideas.json"));

    let mut source = Source::discovered(SourceType::AppleNote, "/data/notes/a.md", "a.md");
    source.mark_processed(2);
    let state = IdeaStore {
        ideas: vec![idea("One", 6), idea("Two", 9)],
        sources: vec![source],
    };

    store.checkpoint(&state).await.unwrap();
    let loaded = store.load().await.unwrap();

    assert_eq!(loaded, state);
    assert_eq!(loaded.average_confidence(), 7.5);
    assert!(loaded.sources_by_path()["/data/notes/a.md"].processed);
}

#[tokio::test]
async fn test_checkpoint_is_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideas.json");
    let store = JsonStore::new(&path);

    store.checkpoint(&IdeaStore::default()).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["ideas"].is_array());
    assert!(value["sources"].is_array());
}

#[tokio::test]
async fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ideas.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonStore::new(&path).load().await.unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));

    // Left untouched
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}
