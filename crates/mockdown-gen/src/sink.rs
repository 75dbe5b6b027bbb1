//! Document sinks.
//!
//! A sink receives each rendered document keyed by its identifier. The batch
//! runner never touches the filesystem itself.

use mockdown_core::util::paths::ensure_dir;
use mockdown_core::{Error, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Destination for rendered documents.
pub trait DocumentSink {
    /// Persist `content` under `id`.
    fn write(&mut self, id: &str, content: &str) -> Result<()>;

    /// Short description for logs, e.g. the output directory.
    fn describe(&self) -> String;
}

// ============================================================================
// FsSink
// ============================================================================

/// Writes `<dir>/<id>.md`, one file per document.
#[derive(Debug, Clone)]
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    /// Create the sink, creating `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a document with `id` is written to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.md"))
    }
}

impl DocumentSink for FsSink {
    fn write(&mut self, id: &str, content: &str) -> Result<()> {
        let path = self.path_for(id);
        std::fs::write(&path, content).map_err(|e| Error::io_with_path(e, &path))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

// ============================================================================
// MemorySink
// ============================================================================

/// Keeps documents in memory. Optionally refuses some identifiers, which
/// lets tests exercise write failures.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    documents: BTreeMap<String, String>,
    order: Vec<String>,
    refuse: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose writes for `ids` fail with an I/O error.
    pub fn refusing<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            refuse: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.documents.get(id).map(String::as_str)
    }

    /// Identifiers in write order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents, sorted by identifier.
    pub fn documents(&self) -> &BTreeMap<String, String> {
        &self.documents
    }
}

impl DocumentSink for MemorySink {
    fn write(&mut self, id: &str, content: &str) -> Result<()> {
        if self.refuse.contains(id) {
            return Err(Error::io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("write refused for {id}"),
            )));
        }
        if self
            .documents
            .insert(id.to_string(), content.to_string())
            .is_none()
        {
            self.order.push(id.to_string());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ============================================================================
// DryRunSink
// ============================================================================

/// Discards documents, counting what would have been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DryRunSink {
    /// Documents received.
    pub documents: usize,
    /// Total bytes received.
    pub bytes: usize,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for DryRunSink {
    fn write(&mut self, id: &str, content: &str) -> Result<()> {
        log::debug!("dry run: {id}.md ({} bytes)", content.len());
        self.documents += 1;
        self.bytes += content.len();
        Ok(())
    }

    fn describe(&self) -> String {
        "dry run".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_sink_writes_id_named_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("content").join("posts");
        let mut sink = FsSink::create(&dir).unwrap();

        sink.write("alpha", "---\n---\n\nbody\n").unwrap();

        let written = std::fs::read_to_string(dir.join("alpha.md")).unwrap();
        assert_eq!(written, "---\n---\n\nbody\n");
        assert_eq!(sink.path_for("beta"), dir.join("beta.md"));
        assert_eq!(sink.dir(), dir.as_path());
    }

    #[test]
    fn test_fs_sink_reports_path_on_failure() {
        let temp = TempDir::new().unwrap();
        let mut sink = FsSink::create(temp.path()).unwrap();
        // A directory in the way of the file.
        std::fs::create_dir(temp.path().join("blocked.md")).unwrap();

        let err = sink.write("blocked", "x").unwrap_err();
        assert!(matches!(err, Error::IoWithPath { .. }));
        assert!(err.to_string().contains("blocked.md"));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::refusing(["bad"]);
        sink.write("b", "2").unwrap();
        sink.write("a", "1").unwrap();
        assert!(sink.write("bad", "x").unwrap_err().is_io());

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("a"), Some("1"));
        assert_eq!(sink.ids(), ["b".to_string(), "a".to_string()]);
        assert_eq!(sink.describe(), "memory");
    }

    #[test]
    fn test_dry_run_sink_counts() {
        let mut sink = DryRunSink::new();
        sink.write("a", "abc").unwrap();
        sink.write("b", "de").unwrap();
        assert_eq!(sink.documents, 2);
        assert_eq!(sink.bytes, 5);
    }
}
