//! Generated documents.
//!
//! A [`Document`] is built once by a generator, rendered once, and handed to
//! a sink. Its front matter depends on the kind of document, so each kind has
//! its own metadata struct and field order.

use chrono::{DateTime, FixedOffset};
use mockdown_core::Result;
use std::fmt;

use crate::frontmatter::FrontMatterWriter;

/// Kinds of generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Blog-style post with a slug identifier.
    Post,
    /// Zettelkasten note with a sequential identifier.
    Note,
    /// Tag index over the notes of a batch.
    Index,
}

impl DocumentKind {
    /// Lowercase name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Note => "note",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Front matter
// ============================================================================

/// Post metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub description: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub draft: bool,
}

/// Note metadata. The id is repeated in the block for note-taking tools.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteMeta {
    pub id: String,
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub tags: Vec<String>,
}

/// Index metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMeta {
    pub title: String,
    pub date: DateTime<FixedOffset>,
}

/// Front matter of a document, one variant per kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontMatter {
    Post(PostMeta),
    Note(NoteMeta),
    Index(IndexMeta),
}

impl FrontMatter {
    /// The document kind this metadata belongs to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Post(_) => DocumentKind::Post,
            Self::Note(_) => DocumentKind::Note,
            Self::Index(_) => DocumentKind::Index,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Post(m) => &m.title,
            Self::Note(m) => &m.title,
            Self::Index(m) => &m.title,
        }
    }

    pub fn date(&self) -> &DateTime<FixedOffset> {
        match self {
            Self::Post(m) => &m.date,
            Self::Note(m) => &m.date,
            Self::Index(m) => &m.date,
        }
    }

    /// Tags of the document; an index has none.
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Post(m) => &m.tags,
            Self::Note(m) => &m.tags,
            Self::Index(_) => &[],
        }
    }

    /// Render the fenced block.
    pub fn render(&self) -> Result<String> {
        let writer = FrontMatterWriter::new();
        let block = match self {
            Self::Post(m) => writer
                .string("title", &m.title)?
                .date("date", &m.date)
                .string("description", &m.description)?
                .list("categories", &m.categories)?
                .list("tags", &m.tags)?
                .list("images", &m.images)?
                .flag("draft", m.draft)
                .finish(),
            Self::Note(m) => writer
                .string("id", &m.id)?
                .string("title", &m.title)?
                .date("date", &m.date)
                .list("tags", &m.tags)?
                .finish(),
            Self::Index(m) => writer
                .string("title", &m.title)?
                .date("date", &m.date)
                .finish(),
        };
        Ok(block)
    }
}

// ============================================================================
// Document
// ============================================================================

/// A generated document ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique identifier within the batch; also the file stem.
    pub id: String,
    pub front_matter: FrontMatter,
    /// Markdown body, without front matter.
    pub body: String,
    /// Link targets emitted into the body, in emission order.
    pub links: Vec<String>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        front_matter: FrontMatter,
        body: impl Into<String>,
        links: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            front_matter,
            body: body.into(),
            links,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.front_matter.kind()
    }

    pub fn title(&self) -> &str {
        self.front_matter.title()
    }

    /// File name the document is persisted under.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }

    /// Front matter, a blank line, then the body.
    pub fn render(&self) -> Result<String> {
        let mut out = self.front_matter.render()?;
        out.push('\n');
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::{parse_date, parse_front_matter};

    fn date() -> DateTime<FixedOffset> {
        parse_date("2024-03-01T10:00:00+0000").unwrap()
    }

    fn note() -> Document {
        Document::new(
            "ZETTEL-0001",
            FrontMatter::Note(NoteMeta {
                id: "ZETTEL-0001".into(),
                title: "Atomic Notes".into(),
                date: date(),
                tags: vec!["notes".into()],
            }),
            "Body with [[ZETTEL-0002]]",
            vec!["ZETTEL-0002".into()],
        )
    }

    #[test]
    fn test_kind_and_file_name() {
        let doc = note();
        assert_eq!(doc.kind(), DocumentKind::Note);
        assert_eq!(doc.kind().to_string(), "note");
        assert_eq!(doc.file_name(), "ZETTEL-0001.md");
        assert_eq!(doc.title(), "Atomic Notes");
    }

    #[test]
    fn test_render_note_layout() {
        let rendered = note().render().unwrap();
        assert_eq!(
            rendered,
            "---\nid: \"ZETTEL-0001\"\ntitle: \"Atomic Notes\"\n\
             date: 2024-03-01T10:00:00+0000\ntags: [\"notes\"]\n---\n\n\
             Body with [[ZETTEL-0002]]\n"
        );
    }

    #[test]
    fn test_render_post_parses_back() {
        let doc = Document::new(
            "alpha-beta",
            FrontMatter::Post(PostMeta {
                title: "Alpha Beta".into(),
                date: date(),
                description: "Short: description".into(),
                categories: vec!["Tech".into()],
                tags: vec!["rust".into(), "web".into()],
                images: vec!["https://placehold.co/120x320".into()],
                draft: false,
            }),
            "Paragraph.\n",
            vec![],
        );

        let rendered = doc.render().unwrap();
        let (value, body) = parse_front_matter(&rendered).unwrap();
        let value = value.unwrap();
        assert_eq!(value["title"].as_str(), Some("Alpha Beta"));
        assert_eq!(value["description"].as_str(), Some("Short: description"));
        assert_eq!(value["tags"].as_sequence().map(|s| s.len()), Some(2));
        assert_eq!(value["draft"].as_bool(), Some(false));
        assert_eq!(body, "Paragraph.\n");
    }

    #[test]
    fn test_index_has_no_tags() {
        let fm = FrontMatter::Index(IndexMeta {
            title: "Zettelkasten Index".into(),
            date: date(),
        });
        assert!(fm.tags().is_empty());
        assert_eq!(fm.kind(), DocumentKind::Index);
        assert!(fm.render().unwrap().contains("title: \"Zettelkasten Index\""));
    }
}
