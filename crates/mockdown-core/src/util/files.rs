//! Async file utilities.
//!
//! Discovery and reading of generated content, used by the link checker and
//! the wikilink converter. Generation itself writes synchronously.

use async_walkdir::{Filtering, WalkDir};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::{Error, Result};

/// Directories never descended into by default.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "vendor", ".obsidian"];

/// Options for discovering content files.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Accepted extensions (without dot, case-insensitive). Empty = all.
    pub extensions: Vec<String>,
    /// Directory names to skip entirely.
    pub exclude_dirs: Vec<String>,
    /// Maximum directory depth to search (None = unlimited).
    pub max_depth: Option<usize>,
}

impl FindOptions {
    /// Markdown files (`.md`, `.markdown`), skipping VCS and tooling dirs.
    pub fn markdown() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            max_depth: None,
        }
    }

    /// Set maximum search depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    fn accepts_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File stem (filename without extension).
    pub stem: String,
    /// Path relative to the search base.
    pub relative_path: PathBuf,
}

/// Find all files matching criteria in a directory, sorted by relative path.
pub async fn find_all_files(base_path: &Path, options: FindOptions) -> Result<Vec<FileInfo>> {
    if !exists(base_path).await {
        return Err(Error::not_found(format!(
            "Directory {} does not exist",
            base_path.display()
        )));
    }

    let excluded = options.exclude_dirs.clone();
    let mut walker = WalkDir::new(base_path).filter(move |entry| {
        let excluded = excluded.clone();
        async move {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            let name = entry.file_name().to_string_lossy().to_string();
            if is_dir && excluded.iter().any(|d| *d == name) {
                Filtering::IgnoreDir
            } else {
                Filtering::Continue
            }
        }
    });

    let mut files = Vec::new();
    while let Some(entry_result) = walker.next().await {
        let entry = entry_result.map_err(|e| {
            Error::operation(format!("walking {}: {e}", base_path.display()))
        })?;
        let path = entry.path();

        if path.is_dir() {
            continue;
        }

        let relative_path = path.strip_prefix(base_path).unwrap_or(&path).to_path_buf();

        if let Some(max_depth) = options.max_depth {
            if relative_path.components().count() > max_depth {
                continue;
            }
        }

        if !options.accepts_extension(&path) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        files.push(FileInfo {
            path: path.to_path_buf(),
            stem,
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!("found {} file(s) under {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub async fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

/// Overwrite a file's contents.
pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|e| Error::io_with_path(e, path))
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_find_all_files_markdown_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.md"), "# One").await.unwrap();
        fs::write(temp.path().join("two.markdown"), "# Two")
            .await
            .unwrap();
        fs::write(temp.path().join("skip.txt"), "skip").await.unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].stem, "one");
        assert_eq!(files[1].stem, "two");
    }

    #[tokio::test]
    async fn test_find_all_files_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).await.unwrap();
        fs::write(temp.path().join(".git").join("hidden.md"), "x")
            .await
            .unwrap();
        fs::create_dir(temp.path().join("notes")).await.unwrap();
        fs::write(temp.path().join("notes").join("kept.md"), "x")
            .await
            .unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown())
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative_path, PathBuf::from("notes/kept.md"));
    }

    #[tokio::test]
    async fn test_find_all_files_max_depth() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a").join("b"))
            .await
            .unwrap();
        fs::write(temp.path().join("top.md"), "x").await.unwrap();
        fs::write(temp.path().join("a").join("b").join("deep.md"), "x")
            .await
            .unwrap();

        let files = find_all_files(temp.path(), FindOptions::markdown().with_max_depth(1))
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].stem, "top");
    }

    #[tokio::test]
    async fn test_find_all_files_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = find_all_files(&missing, FindOptions::markdown())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_read_write_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.md");
        write_file(&file_path, "# Test Content").await.unwrap();

        let read_content = read_file(&file_path).await.unwrap();
        assert_eq!(read_content, "# Test Content");
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let result = read_file(Path::new("/nonexistent/file.md")).await;
        assert!(result.unwrap_err().is_io());
    }

    #[tokio::test]
    async fn test_exists() {
        let temp = TempDir::new().unwrap();
        assert!(exists(temp.path()).await);
        assert!(!exists(&temp.path().join("missing")).await);
    }
}
