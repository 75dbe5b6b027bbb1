//! Placeholder vocabulary.
//!
//! Every generated string is assembled from six word lists. They are loaded
//! once, validated up front, and never mutated afterwards: a list that is
//! missing, malformed, or empty stops the run before any document exists.

use mockdown_core::rng::ChoiceSource;
use mockdown_core::{Error, Result};
use std::path::Path;

/// One placeholder list: its vocabulary name and the YAML file it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderFile {
    /// Name used in errors and logs.
    pub name: &'static str,
    /// File name inside the placeholder directory.
    pub file: &'static str,
}

/// The six lists, in load order.
pub const PLACEHOLDER_FILES: [PlaceholderFile; 6] = [
    PlaceholderFile {
        name: "title_words",
        file: "title_words.yaml",
    },
    PlaceholderFile {
        name: "categories",
        file: "categories.yaml",
    },
    PlaceholderFile {
        name: "tags",
        file: "tags.yaml",
    },
    PlaceholderFile {
        name: "paragraphs",
        file: "lorem_paragraphs.yaml",
    },
    PlaceholderFile {
        name: "descriptions",
        file: "lorem_description.yaml",
    },
    PlaceholderFile {
        name: "concepts",
        file: "concepts.yaml",
    },
];

const BUILTIN: [&str; 6] = [
    include_str!("../placeholders/title_words.yaml"),
    include_str!("../placeholders/categories.yaml"),
    include_str!("../placeholders/tags.yaml"),
    include_str!("../placeholders/lorem_paragraphs.yaml"),
    include_str!("../placeholders/lorem_description.yaml"),
    include_str!("../placeholders/concepts.yaml"),
];

// ============================================================================
// WordList
// ============================================================================

/// A named, non-empty list of placeholder strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    name: String,
    items: Vec<String>,
}

impl WordList {
    /// Build a list, rejecting empty input and blank entries.
    pub fn new(name: impl Into<String>, items: Vec<String>) -> Result<Self> {
        let name = name.into();
        if items.is_empty() {
            return Err(Error::placeholder_load(name, "list is empty"));
        }
        if let Some(pos) = items.iter().position(|s| s.trim().is_empty()) {
            return Err(Error::placeholder_load(
                name,
                format!("entry {} is blank", pos + 1),
            ));
        }
        Ok(Self { name, items })
    }

    /// Parse a YAML sequence of strings.
    pub fn from_yaml(name: impl Into<String>, text: &str) -> Result<Self> {
        let name = name.into();
        let items: Vec<String> = serde_yaml::from_str(text)
            .map_err(|e| Error::placeholder_load(name.clone(), e.to_string()))?;
        Self::new(name, items)
    }

    /// Vocabulary name of this list.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All entries, in file order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// One uniformly chosen entry.
    pub fn pick<R: ChoiceSource>(&self, rng: &mut R) -> &str {
        &self.items[rng.below(self.items.len())]
    }

    /// Between `lo` and `hi` distinct entries (clipped to the list length).
    pub fn sample<R: ChoiceSource>(&self, rng: &mut R, lo: usize, hi: usize) -> Vec<&str> {
        let k = rng.between(lo, hi);
        rng.sample_indices(self.items.len(), k)
            .into_iter()
            .map(|i| self.items[i].as_str())
            .collect()
    }
}

// ============================================================================
// Vocabulary
// ============================================================================

/// The complete set of placeholder lists a batch draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// Words combined into titles and headings.
    pub title_words: WordList,
    /// Post categories.
    pub categories: WordList,
    /// Tags for posts and notes.
    pub tags: WordList,
    /// Long lorem-ipsum paragraphs.
    pub paragraphs: WordList,
    /// One-sentence descriptions.
    pub descriptions: WordList,
    /// Zettelkasten concept names, used as note titles.
    pub concepts: WordList,
}

impl Vocabulary {
    /// Load every list from `dir`.
    ///
    /// # Errors
    ///
    /// `PlaceholderLoad` naming the first list that is missing, unreadable,
    /// malformed, or empty.
    pub fn load(dir: &Path) -> Result<Self> {
        log::debug!("loading placeholders from {}", dir.display());
        Self::from_sources(|file| {
            let path = dir.join(file.file);
            std::fs::read_to_string(&path).map_err(|e| {
                Error::placeholder_load(file.name, format!("{}: {e}", path.display()))
            })
        })
    }

    /// The vocabulary shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(|file| {
            PLACEHOLDER_FILES
                .iter()
                .position(|f| f == file)
                .map(|i| BUILTIN[i].to_string())
                .ok_or_else(|| Error::placeholder_load(file.name, "no built-in list"))
        })
    }

    /// Load from `dir` when given, otherwise fall back to the built-in lists.
    pub fn load_or_builtin(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Self::builtin(),
        }
    }

    /// Build from any source that can produce the YAML text of each list.
    pub fn from_sources<F>(mut read: F) -> Result<Self>
    where
        F: FnMut(&PlaceholderFile) -> Result<String>,
    {
        let mut lists = Vec::with_capacity(PLACEHOLDER_FILES.len());
        for file in &PLACEHOLDER_FILES {
            let text = read(file)?;
            lists.push(WordList::from_yaml(file.name, &text)?);
        }

        let mut lists = lists.into_iter();
        let mut next = || {
            lists
                .next()
                .ok_or_else(|| Error::operation("placeholder list count mismatch"))
        };
        Ok(Self {
            title_words: next()?,
            categories: next()?,
            tags: next()?,
            paragraphs: next()?,
            descriptions: next()?,
            concepts: next()?,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
