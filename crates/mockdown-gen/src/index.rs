//! Zettelkasten index page.

use mockdown_content::markdown::wikilink;
use mockdown_content::{Document, FrontMatter, IndexMeta};
use mockdown_core::rng::ChoiceSource;
use mockdown_core::{IdentifierRegistry, Result};

use crate::options::IndexOptions;

/// Builds the tag index over a batch of notes.
#[derive(Debug, Clone, Default)]
pub struct IndexGenerator {
    options: IndexOptions,
}

impl IndexGenerator {
    pub fn new(options: IndexOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Generate the index for `notes`, minting its own identifier.
    ///
    /// Notes are grouped by their tags in first-seen order; each group lists
    /// up to `per_tag` randomly chosen notes.
    pub fn generate<R: ChoiceSource>(
        &self,
        notes: &[Document],
        registry: &mut IdentifierRegistry,
        rng: &mut R,
    ) -> Result<Document> {
        let id = registry.mint(&self.options.candidate, rng)?;

        let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
        for note in notes {
            for tag in note.front_matter.tags() {
                match groups.iter_mut().find(|(t, _)| *t == tag.as_str()) {
                    Some((_, ids)) => ids.push(note.id.as_str()),
                    None => groups.push((tag.as_str(), vec![note.id.as_str()])),
                }
            }
        }

        let mut body = format!("# {}\n\n## {}\n", self.options.title, self.options.section);
        let mut links = Vec::new();
        for (tag, ids) in &groups {
            body.push_str(&format!("\n### {tag}\n"));
            for i in rng.sample_indices(ids.len(), self.options.per_tag) {
                let target = ids[i];
                if target == id || !registry.contains(target) {
                    continue;
                }
                body.push_str(&format!("- {}\n", wikilink(target)));
                links.push(target.to_string());
            }
        }

        log::debug!(
            "generated index {id}: {} tag(s), {} link(s)",
            groups.len(),
            links.len()
        );
        Ok(Document::new(
            id,
            FrontMatter::Index(IndexMeta {
                title: self.options.title.clone(),
                date: self.options.date,
            }),
            body,
            links,
        ))
    }
}
