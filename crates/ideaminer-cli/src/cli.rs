//! CLI argument definitions and configuration merging.

use crate::error::Result;
use clap::Parser;
use ideaminer_pipeline::PipelineConfig;
use std::path::PathBuf;

/// Mine startup ideas from iMessage, Apple Notes and Skype exports.
///
/// Flags override values from `--config`. An empty directory value
/// (e.g. `--skypeDir=`) skips that kind of export; any other empty value
/// falls back to its default.
#[derive(Debug, Parser)]
#[command(name = "ideaminer-extract")]
#[command(version, about, long_about = None)]
pub struct ExtractArgs {
    /// iMessage HTML export directory [default: ./data/imessage]
    #[arg(long = "iMessageDir", value_name = "DIR")]
    pub imessage_dir: Option<String>,

    /// Apple Notes markdown export directory [default: ./data/notes]
    #[arg(long = "appleNotesDir", value_name = "DIR")]
    pub apple_notes_dir: Option<String>,

    /// Skype JSON export directory [default: ./data/skype]
    #[arg(long = "skypeDir", value_name = "DIR")]
    pub skype_dir: Option<String>,

    /// Store file [default: ./data/ideas.json]
    #[arg(long = "outputFile", value_name = "FILE")]
    pub output_file: Option<String>,

    /// Model name [default: deepseek-r1]
    #[arg(long = "model")]
    pub model: Option<String>,

    /// Ollama API base URL [default: http://localhost:11434/api]
    #[arg(long = "ollamaUrl", env = "OLLAMA_URL", value_name = "URL")]
    pub ollama_url: Option<String>,

    /// Maximum characters per extraction chunk [default: 4000]
    #[arg(long = "chunkSize", value_name = "CHARS")]
    pub chunk_size: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "noColor")]
    pub no_color: bool,
}

impl ExtractArgs {
    /// Build the run configuration: file (or defaults), then flags
    ///
    /// Relative paths are resolved against the working directory.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(dir) = &self.imessage_dir {
            config.imessage_dir = optional_dir(dir);
        }
        if let Some(dir) = &self.apple_notes_dir {
            config.apple_notes_dir = optional_dir(dir);
        }
        if let Some(dir) = &self.skype_dir {
            config.skype_dir = optional_dir(dir);
        }
        if let Some(file) = non_empty(&self.output_file) {
            config.output_file = PathBuf::from(file);
        }
        if let Some(model) = non_empty(&self.model) {
            config.model = model.to_string();
        }
        if let Some(url) = non_empty(&self.ollama_url) {
            config.ollama_url = url.to_string();
        }
        if let Some(chunk_size) = self.chunk_size {
            config.extractor.chunk_size = chunk_size;
        }

        config.validate()?;
        Ok(config.into_absolute()?)
    }
}

/// Store file validated when `--ideasFile` is not given
pub const DEFAULT_IDEAS_FILE: &str = "./data/ideas.json";

/// Check a persisted idea store for duplicate and missing ids.
#[derive(Debug, Parser)]
#[command(name = "ideaminer-validate")]
#[command(version, about, long_about = None)]
pub struct ValidateArgs {
    /// Store file to validate [default: ./data/ideas.json]
    #[arg(long = "ideasFile", value_name = "FILE")]
    pub ideas_file: Option<String>,

    /// Disable colored output
    #[arg(long = "noColor")]
    pub no_color: bool,
}

impl ValidateArgs {
    /// Store file resolved against the working directory
    pub fn resolved_ideas_file(&self) -> Result<PathBuf> {
        let file = non_empty(&self.ideas_file).unwrap_or(DEFAULT_IDEAS_FILE);
        Ok(std::path::absolute(file)?)
    }
}

fn optional_dir(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ExtractArgs {
        let mut argv = vec!["ideaminer-extract"];
        argv.extend_from_slice(args);
        ExtractArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).to_config().unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(config.model, "deepseek-r1");
        assert_eq!(config.imessage_dir, Some(cwd.join("data/imessage")));
        assert_eq!(config.apple_notes_dir, Some(cwd.join("data/notes")));
        assert_eq!(config.skype_dir, Some(cwd.join("data/skype")));
        assert_eq!(config.output_file, cwd.join("data/ideas.json"));
    }

    #[test]
    fn test_camel_case_flags() {
        let config = parse(&[
            "--iMessageDir=/exports/im",
            "--appleNotesDir=/exports/notes",
            "--skypeDir=/exports/skype",
            "--outputFile=/exports/ideas.json",
            "--model=llama3",
            "--chunkSize=2000",
        ])
        .to_config()
        .unwrap();

        assert_eq!(config.imessage_dir, Some(PathBuf::from("/exports/im")));
        assert_eq!(config.apple_notes_dir, Some(PathBuf::from("/exports/notes")));
        assert_eq!(config.skype_dir, Some(PathBuf::from("/exports/skype")));
        assert_eq!(config.output_file, PathBuf::from("/exports/ideas.json"));
        assert_eq!(config.model, "llama3");
        assert_eq!(config.extractor.chunk_size, 2000);
    }

    #[test]
    fn test_empty_dir_disables_kind() {
        let config = parse(&["--skypeDir=", "--iMessageDir="]).to_config().unwrap();
        assert!(config.skype_dir.is_none());
        assert!(config.imessage_dir.is_none());
        assert!(config.apple_notes_dir.is_some());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        assert!(parse(&["--chunkSize=0"]).to_config().is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ideaminer.toml");
        std::fs::write(
            &path,
            "model = \"mistral\"\nskype_dir = \"/from/file\"\n\n[extractor]\nchunk_size = 1000\n",
        )
        .unwrap();

        let config = parse(&["--config", path.to_str().unwrap(), "--model=llama3"])
            .to_config()
            .unwrap();

        assert_eq!(config.model, "llama3");
        assert_eq!(config.skype_dir, Some(PathBuf::from("/from/file")));
        assert_eq!(config.extractor.chunk_size, 1000);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = parse(&["--outputFile=", "--model=", "--ollamaUrl="])
            .to_config()
            .unwrap();
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(config.output_file, cwd.join("data/ideas.json"));
        assert_eq!(config.model, "deepseek-r1");
        assert_eq!(config.ollama_url, "http://localhost:11434/api");
    }

    #[test]
    fn test_validate_args() {
        let cwd = std::env::current_dir().unwrap();
        let args = ValidateArgs::try_parse_from(["ideaminer-validate"]).unwrap();
        assert!(args.ideas_file.is_none());
        assert_eq!(args.resolved_ideas_file().unwrap(), cwd.join("data/ideas.json"));

        let args = ValidateArgs::try_parse_from(["ideaminer-validate", "--ideasFile="]).unwrap();
        assert_eq!(args.resolved_ideas_file().unwrap(), cwd.join("data/ideas.json"));

        let args =
            ValidateArgs::try_parse_from(["ideaminer-validate", "--ideasFile=/tmp/x.json"]).unwrap();
        assert_eq!(args.resolved_ideas_file().unwrap(), PathBuf::from("/tmp/x.json"));
    }
}
