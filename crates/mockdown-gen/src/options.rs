//! Generator options.
//!
//! Every knob has the default the generators were tuned with; callers
//! override individual fields through the `with_*` builders.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use mockdown_content::markdown::Element;
use mockdown_core::rng::ChoiceSource;
use mockdown_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Draw an inclusive count from `range`.
pub(crate) fn draw<R: ChoiceSource>(rng: &mut R, range: &RangeInclusive<usize>) -> usize {
    rng.between(*range.start(), *range.end())
}

/// A timestamp up to `max_days` days and one extra day of seconds before `now`.
pub(crate) fn backdate<R: ChoiceSource>(
    rng: &mut R,
    now: DateTime<FixedOffset>,
    max_days: usize,
) -> DateTime<FixedOffset> {
    let days = rng.between(0, max_days) as i64;
    let seconds = rng.between(0, 86_400) as i64;
    now - TimeDelta::days(days) - TimeDelta::seconds(seconds)
}

// ============================================================================
// FailurePolicy
// ============================================================================

/// What the batch runner does when a document cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the batch and return the error.
    #[default]
    Abort,
    /// Log, record the failure in the report, and continue.
    Skip,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(Error::config(format!(
                "Unknown write failure policy '{other}' (expected 'abort' or 'skip')"
            ))),
        }
    }
}

// ============================================================================
// PostOptions
// ============================================================================

/// Shape of generated blog posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostOptions {
    /// Distinct title words per title.
    pub title_words: RangeInclusive<usize>,
    /// Maximum age of a post in days.
    pub max_age_days: usize,
    pub tags: RangeInclusive<usize>,
    /// Descriptions joined into the front matter description.
    pub descriptions: RangeInclusive<usize>,
    /// Sections in the body.
    pub sections: RangeInclusive<usize>,
    /// Paragraph chunks per section.
    pub chunks: RangeInclusive<usize>,
    /// Lorem paragraphs per chunk.
    pub paragraphs_per_chunk: RangeInclusive<usize>,
    /// Optional elements and their per-section probability, in render order.
    pub elements: Vec<(Element, f64)>,
    /// Probability that a section ends with a `[[link]]`.
    pub link_probability: f64,
    pub images: Vec<String>,
    pub draft: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            title_words: 3..=5,
            max_age_days: 365,
            tags: 2..=4,
            descriptions: 2..=6,
            sections: 8..=15,
            chunks: 2..=5,
            paragraphs_per_chunk: 1..=3,
            elements: Element::DEFAULT_MIX.to_vec(),
            link_probability: 1.0,
            images: vec!["https://placehold.co/120x320".to_string()],
            draft: false,
        }
    }
}

impl PostOptions {
    pub fn with_link_probability(mut self, probability: f64) -> Self {
        self.link_probability = probability;
        self
    }

    pub fn with_sections(mut self, sections: RangeInclusive<usize>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }
}

// ============================================================================
// NoteOptions
// ============================================================================

/// Shape of generated zettelkasten notes.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteOptions {
    /// Identifier prefix, e.g. `ZETTEL` for `ZETTEL-0001`.
    pub prefix: String,
    /// Zero padding of the sequence number.
    pub width: usize,
    pub max_age_days: usize,
    pub tags: RangeInclusive<usize>,
    /// Opening lorem paragraphs.
    pub paragraphs: RangeInclusive<usize>,
    pub bullet_probability: f64,
    pub bullets: RangeInclusive<usize>,
    pub callout_probability: f64,
    pub code_probability: f64,
    /// Probability of a `See also: [[id]]` line.
    pub link_probability: f64,
    /// Related links are only added once the batch holds more notes than this.
    pub related_threshold: usize,
    /// Related links per note when active.
    pub related: RangeInclusive<usize>,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            prefix: "ZETTEL".to_string(),
            width: 4,
            max_age_days: 730,
            tags: 1..=3,
            paragraphs: 1..=2,
            bullet_probability: 0.7,
            bullets: 2..=4,
            callout_probability: 0.4,
            code_probability: 0.3,
            link_probability: 0.6,
            related_threshold: 5,
            related: 6..=10,
        }
    }
}

impl NoteOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_link_probability(mut self, probability: f64) -> Self {
        self.link_probability = probability;
        self
    }

    pub fn with_related_threshold(mut self, threshold: usize) -> Self {
        self.related_threshold = threshold;
        self
    }

    pub fn with_related(mut self, related: RangeInclusive<usize>) -> Self {
        self.related = related;
        self
    }
}

// ============================================================================
// IndexOptions
// ============================================================================

/// 2023-01-01T00:00:00 UTC.
const INDEX_EPOCH_SECS: i64 = 1_672_531_200;

/// Shape of the zettelkasten index page.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    /// Candidate identifier, minted like any post slug.
    pub candidate: String,
    pub title: String,
    /// Heading above the tag groups.
    pub section: String,
    /// Notes listed per tag.
    pub per_tag: usize,
    pub date: DateTime<FixedOffset>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            candidate: "zettelkasten-index".to_string(),
            title: "Zettelkasten Index".to_string(),
            section: "Main Concepts".to_string(),
            per_tag: 5,
            date: (DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(INDEX_EPOCH_SECS))
                .fixed_offset(),
        }
    }
}

impl IndexOptions {
    pub fn with_per_tag(mut self, per_tag: usize) -> Self {
        self.per_tag = per_tag;
        self
    }
}
