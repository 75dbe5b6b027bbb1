//! Zettelkasten note generation.
//!
//! Note identifiers are minted for the whole batch before the first note is
//! written, so any note may link to any other note, including later ones.

use chrono::{DateTime, FixedOffset};
use mockdown_content::markdown::{fenced, paragraphs, wikilink};
use mockdown_content::{Document, FrontMatter, NoteMeta, Vocabulary};
use mockdown_core::rng::ChoiceSource;
use mockdown_core::{IdentifierRegistry, Result};

use crate::options::{NoteOptions, backdate, draw};

const CODE_LANGS: [&str; 3] = ["python", "bash", "javascript"];
const CODE_CALLS: [&str; 3] = ["print()", "echo", "console.log()"];

/// Heading of the related notes section.
pub const RELATED_HEADING: &str = "## Related Notes";

/// Generates zettelkasten notes for pre-minted identifiers.
#[derive(Debug, Clone)]
pub struct NoteGenerator<'a> {
    vocab: &'a Vocabulary,
    options: NoteOptions,
    now: DateTime<FixedOffset>,
}

impl<'a> NoteGenerator<'a> {
    pub fn new(vocab: &'a Vocabulary, options: NoteOptions, now: DateTime<FixedOffset>) -> Self {
        Self {
            vocab,
            options,
            now,
        }
    }

    pub fn options(&self) -> &NoteOptions {
        &self.options
    }

    /// Mint every note identifier of a batch, in order.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if `registry` already holds one of them.
    pub fn mint_ids(&self, registry: &mut IdentifierRegistry, count: usize) -> Result<Vec<String>> {
        registry.mint_sequence(&self.options.prefix, count, self.options.width)
    }

    /// Generate the note for `id`, linking only to identifiers in `registry`.
    pub fn generate<R: ChoiceSource>(
        &self,
        id: &str,
        registry: &IdentifierRegistry,
        rng: &mut R,
    ) -> Result<Document> {
        let opts = &self.options;
        let title = self.vocab.concepts.pick(rng).to_string();
        let date = backdate(rng, self.now, opts.max_age_days);
        let tags = self
            .vocab
            .tags
            .sample(rng, *opts.tags.start(), *opts.tags.end())
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut links = Vec::new();
        let mut parts = vec![paragraphs(
            self.vocab,
            rng,
            *opts.paragraphs.start(),
            *opts.paragraphs.end(),
        )];

        if rng.chance(opts.bullet_probability) {
            let bullets = (0..draw(rng, &opts.bullets))
                .map(|_| format!("- {}", self.vocab.descriptions.pick(rng)))
                .collect::<Vec<_>>()
                .join("\n");
            parts.push(bullets);
        }

        if rng.chance(opts.callout_probability) {
            parts.push(format!("> **Note**: {}", self.vocab.descriptions.pick(rng)));
        }

        if rng.chance(opts.code_probability) {
            let lang = CODE_LANGS[rng.below(CODE_LANGS.len())];
            let word = self.vocab.title_words.pick(rng);
            let call = CODE_CALLS[rng.below(CODE_CALLS.len())];
            parts.push(fenced(lang, &format!("# {word}\n{call}")));
        }

        if rng.chance(opts.link_probability) {
            if let Some(target) = registry.pick_link_target(id, rng) {
                parts.push(format!("See also: {}", wikilink(target)));
                links.push(target.to_string());
            }
        }

        let related = if registry.len() > opts.related_threshold {
            let wanted = draw(rng, &opts.related);
            registry.pick_link_targets(id, wanted, rng)
        } else {
            Vec::new()
        };

        let mut body = parts.join("\n\n");
        body.push_str("\n\n");
        body.push_str(RELATED_HEADING);
        body.push_str("\n\n");
        for target in &related {
            body.push_str(&format!("- {}\n", wikilink(target)));
        }
        body.push_str(&format!("\n*ID: {id}*\n"));
        links.extend(related);

        log::debug!("generated note {id} ({} link(s))", links.len());
        Ok(Document::new(
            id,
            FrontMatter::Note(NoteMeta {
                id: id.to_string(),
                title,
                date,
                tags,
            }),
            body,
            links,
        ))
    }
}
