use ideaminer_cli::commands::execute_extract;
use ideaminer_cli::output::Formatter;
use ideaminer_cli::{CliError, ExtractArgs};
use ideaminer_pipeline::PipelineError;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOTE: &str = "Idea: a subscription box of seasonal seeds for balcony gardeners in small flats.";

fn args(root: &std::path::Path, ollama_url: String) -> ExtractArgs {
    ExtractArgs {
        imessage_dir: Some(String::new()),
        apple_notes_dir: Some(root.join("notes").to_string_lossy().into_owned()),
        skype_dir: Some(String::new()),
        output_file: Some(root.join("ideas.json").to_string_lossy().into_owned()),
        model: Some("deepseek-r1".to_string()),
        ollama_url: Some(ollama_url),
        chunk_size: None,
        config: None,
        no_color: true,
    }
}

#[tokio::test]
async fn test_extract_against_stub_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"models": [{"name": "deepseek-r1:latest"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "[{\"title\": \"SeedBox\", \"description\": \"Seasonal seeds\", \"problem\": \"Choosing seeds\", \"targetAudience\": \"Balcony gardeners\", \"confidenceScore\": 8}]"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("notes")).unwrap();
    std::fs::write(root.path().join("notes").join("Garden - 2024-04-01.md"), NOTE).unwrap();

    let stats = execute_extract(&args(root.path(), format!("{}/api", server.uri())), &Formatter::new(false))
        .await
        .unwrap();

    assert_eq!(stats.total_sources, 1);
    assert_eq!(stats.new_ideas, 1);
    assert_eq!(stats.average_confidence, 8.0);

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(root.path().join("ideas.json")).unwrap()).unwrap();
    assert_eq!(stored["ideas"][0]["title"], "SeedBox");
    assert_eq!(stored["ideas"][0]["sourceType"], "AppleNote");
}

#[tokio::test]
async fn test_extract_fails_when_model_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": [{"name": "llama3:8b"}]})))
        .mount(&server)
        .await;

    let root = tempfile::tempdir().unwrap();
    let result = execute_extract(&args(root.path(), format!("{}/api", server.uri())), &Formatter::new(false)).await;

    assert!(matches!(
        result,
        Err(CliError::Pipeline(PipelineError::NotReady(_)))
    ));
    assert!(!root.path().join("ideas.json").exists());
}
