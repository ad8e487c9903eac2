//! Directory listing shared by all formats

use crate::error::ParserError;
use std::path::Path;

/// List the names of regular files in `dir` ending in `.<extension>`
///
/// Names are returned sorted so discovery order is stable across runs.
/// Subdirectories are not descended into.
pub async fn list_files(dir: &Path, extension: &str) -> Result<Vec<String>, ParserError> {
    let suffix = format!(".{}", extension);
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ParserError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| ParserError::io(dir, e))? {
        let file_type = entry.file_type().await.map_err(|e| ParserError::io(entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.ends_with(&suffix) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

pub(crate) async fn read_file(path: &Path) -> Result<String, ParserError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ParserError::io(path, e))
}

/// File name without its final extension
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
