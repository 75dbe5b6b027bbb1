//! Blog post generation.
//!
//! A post's identifier is the slug of its random title. Posts are generated
//! one after another, so a post can only link to posts generated before it:
//! the registry holds nothing else yet.

use chrono::{DateTime, FixedOffset};
use mockdown_content::markdown::{paragraphs, wikilink};
use mockdown_content::{Document, FrontMatter, PostMeta, Vocabulary};
use mockdown_core::rng::ChoiceSource;
use mockdown_core::{IdentifierRegistry, Result, candidate_from_title};

use crate::options::{PostOptions, backdate, draw};

/// Generates blog posts from a vocabulary.
#[derive(Debug, Clone)]
pub struct PostGenerator<'a> {
    vocab: &'a Vocabulary,
    options: PostOptions,
    now: DateTime<FixedOffset>,
}

impl<'a> PostGenerator<'a> {
    pub fn new(vocab: &'a Vocabulary, options: PostOptions, now: DateTime<FixedOffset>) -> Self {
        Self {
            vocab,
            options,
            now,
        }
    }

    pub fn options(&self) -> &PostOptions {
        &self.options
    }

    /// Generate one post, minting its identifier into `registry`.
    ///
    /// # Errors
    ///
    /// Propagates `IdentifierSpaceExhausted` from minting.
    pub fn generate<R: ChoiceSource>(
        &self,
        registry: &mut IdentifierRegistry,
        rng: &mut R,
    ) -> Result<Document> {
        let opts = &self.options;
        let date = backdate(rng, self.now, opts.max_age_days);

        let title = self
            .vocab
            .title_words
            .sample(rng, *opts.title_words.start(), *opts.title_words.end())
            .join(" ");
        let id = registry.mint(&candidate_from_title(&title), rng)?;

        let category = self.vocab.categories.pick(rng).to_string();
        let tags = self
            .vocab
            .tags
            .sample(rng, *opts.tags.start(), *opts.tags.end())
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut links = Vec::new();
        let sections = draw(rng, &opts.sections);
        let body = (0..sections)
            .map(|_| self.section(&id, registry, rng, &mut links))
            .collect::<Vec<_>>()
            .join("\n\n");

        let description = self
            .vocab
            .descriptions
            .sample(rng, *opts.descriptions.start(), *opts.descriptions.end())
            .join(" ");

        log::debug!("generated post {id} ({} link(s))", links.len());
        Ok(Document::new(
            id,
            FrontMatter::Post(PostMeta {
                title,
                date,
                description,
                categories: vec![category],
                tags,
                images: opts.images.clone(),
                draft: opts.draft,
            }),
            body,
            links,
        ))
    }

    /// Paragraph chunks, then optional elements, then maybe a link.
    fn section<R: ChoiceSource>(
        &self,
        id: &str,
        registry: &IdentifierRegistry,
        rng: &mut R,
        links: &mut Vec<String>,
    ) -> String {
        let opts = &self.options;
        let mut parts = Vec::new();

        for _ in 0..draw(rng, &opts.chunks) {
            parts.push(paragraphs(
                self.vocab,
                rng,
                *opts.paragraphs_per_chunk.start(),
                *opts.paragraphs_per_chunk.end(),
            ));
        }

        for &(element, probability) in &opts.elements {
            if rng.chance(probability) {
                parts.push(element.render(self.vocab, rng));
            }
        }

        if rng.chance(opts.link_probability) {
            if let Some(target) = registry.pick_link_target(id, rng) {
                parts.push(wikilink(target));
                links.push(target.to_string());
            }
        }

        parts.join("\n\n")
    }
}
