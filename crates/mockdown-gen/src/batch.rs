//! Batch runner.
//!
//! One batch owns one [`IdentifierRegistry`] from start to finish. Documents
//! are generated strictly in sequence: mint, build the body (which may ask
//! the registry for link targets), render, hand to the sink. The registry
//! is never rolled back, so an identifier whose document failed to write
//! stays reserved.

use chrono::{DateTime, FixedOffset};
use mockdown_content::{Document, DocumentKind, Vocabulary};
use mockdown_core::rng::ChoiceSource;
use mockdown_core::{IdentifierRegistry, Result, SuffixPolicy};
use std::path::Path;

use crate::index::IndexGenerator;
use crate::note::NoteGenerator;
use crate::options::{FailurePolicy, IndexOptions, NoteOptions, PostOptions};
use crate::post::PostGenerator;
use crate::sink::DocumentSink;

// ============================================================================
// Report
// ============================================================================

/// A `[[target]]` emitted into `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkRef {
    pub source: String,
    pub target: String,
}

/// A document that was generated but could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub id: String,
    pub error: String,
}

/// Outcome of one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Identifiers of every generated document, in generation order.
    pub generated: Vec<String>,
    /// Identifiers that reached the sink.
    pub written: Vec<String>,
    /// Documents skipped after a write failure.
    pub failures: Vec<WriteFailure>,
    /// Every link emitted, in emission order.
    pub links: Vec<LinkRef>,
}

impl BatchReport {
    /// True when every generated document was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.written.len() == self.generated.len()
    }

    fn record_links(&mut self, doc: &Document) {
        self.links.extend(doc.links.iter().map(|target| LinkRef {
            source: doc.id.clone(),
            target: target.clone(),
        }));
    }
}

// ============================================================================
// BatchRunner
// ============================================================================

/// Runs post and note batches against a sink.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    vocab: Vocabulary,
    now: DateTime<FixedOffset>,
    on_write_error: FailurePolicy,
    suffix: SuffixPolicy,
}

impl BatchRunner {
    pub fn new(vocab: Vocabulary, now: DateTime<FixedOffset>) -> Self {
        Self {
            vocab,
            now,
            on_write_error: FailurePolicy::default(),
            suffix: SuffixPolicy::default(),
        }
    }

    /// Load the vocabulary first, so a bad placeholder list fails the batch
    /// before anything is generated.
    pub fn load(placeholders: Option<&Path>, now: DateTime<FixedOffset>) -> Result<Self> {
        Ok(Self::new(Vocabulary::load_or_builtin(placeholders)?, now))
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_write_error = policy;
        self
    }

    /// Minimum suffix policy; widened per batch to fit its size.
    pub fn with_suffix_policy(mut self, policy: SuffixPolicy) -> Self {
        self.suffix = policy;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Generate `count` posts.
    pub fn posts<R, S>(
        &self,
        count: usize,
        options: &PostOptions,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<BatchReport>
    where
        R: ChoiceSource,
        S: DocumentSink + ?Sized,
    {
        let mut registry = IdentifierRegistry::with_policy(self.policy_for(count));
        let generator = PostGenerator::new(&self.vocab, options.clone(), self.now);
        let mut report = BatchReport::default();

        log::info!("generating {count} post(s) into {}", sink.describe());
        for _ in 0..count {
            let doc = generator.generate(&mut registry, rng)?;
            self.emit(&doc, sink, &mut report)?;
        }
        self.summarize(DocumentKind::Post, &report);
        Ok(report)
    }

    /// Generate `count` notes, then the index page when `index` is given.
    pub fn notes<R, S>(
        &self,
        count: usize,
        options: &NoteOptions,
        index: Option<&IndexOptions>,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<BatchReport>
    where
        R: ChoiceSource,
        S: DocumentSink + ?Sized,
    {
        let mut registry = IdentifierRegistry::with_policy(self.policy_for(count + 1));
        let generator = NoteGenerator::new(&self.vocab, options.clone(), self.now);
        let ids = generator.mint_ids(&mut registry, count)?;
        let mut report = BatchReport::default();
        let mut notes = Vec::with_capacity(if index.is_some() { count } else { 0 });

        log::info!("generating {count} note(s) into {}", sink.describe());
        for id in &ids {
            let doc = generator.generate(id, &registry, rng)?;
            self.emit(&doc, sink, &mut report)?;
            if index.is_some() {
                notes.push(doc);
            }
        }

        if let Some(options) = index {
            let doc = IndexGenerator::new(options.clone()).generate(&notes, &mut registry, rng)?;
            self.emit(&doc, sink, &mut report)?;
        }

        self.summarize(DocumentKind::Note, &report);
        Ok(report)
    }

    fn policy_for(&self, expected: usize) -> SuffixPolicy {
        let sized = SuffixPolicy::for_batch(expected);
        self.suffix.with_digits(self.suffix.digits().max(sized.digits()))
    }

    fn emit<S: DocumentSink + ?Sized>(
        &self,
        doc: &Document,
        sink: &mut S,
        report: &mut BatchReport,
    ) -> Result<()> {
        let rendered = doc.render()?;
        report.generated.push(doc.id.clone());
        report.record_links(doc);

        match sink.write(&doc.id, &rendered) {
            Ok(()) => {
                report.written.push(doc.id.clone());
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => match self.on_write_error {
                FailurePolicy::Abort => Err(e),
                FailurePolicy::Skip => {
                    log::warn!("skipping {}: {e}", doc.file_name());
                    report.failures.push(WriteFailure {
                        id: doc.id.clone(),
                        error: e.to_string(),
                    });
                    Ok(())
                }
            },
        }
    }

    fn summarize(&self, kind: DocumentKind, report: &BatchReport) {
        log::info!(
            "{kind} batch: {} generated, {} written, {} failed, {} link(s)",
            report.generated.len(),
            report.written.len(),
            report.failures.len(),
            report.links.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{DryRunSink, MemorySink};
    use mockdown_content::frontmatter::parse_date;
    use mockdown_core::Error;
    use mockdown_core::rng::seeded;

    fn runner() -> BatchRunner {
        BatchRunner::new(
            Vocabulary::builtin().unwrap(),
            parse_date("2025-06-01T12:00:00+0000").unwrap(),
        )
    }

    #[test]
    fn test_posts_report_matches_sink() {
        let mut sink = MemorySink::new();
        let mut rng = seeded(Some(1));
        let report = runner()
            .posts(10, &PostOptions::default(), &mut rng, &mut sink)
            .unwrap();

        assert_eq!(report.generated.len(), 10);
        assert_eq!(report.written, report.generated);
        assert!(report.is_complete());
        assert_eq!(sink.ids(), report.generated.as_slice());
    }

    #[test]
    fn test_notes_with_index() {
        let mut sink = MemorySink::new();
        let mut rng = seeded(Some(2));
        let report = runner()
            .notes(
                8,
                &NoteOptions::default(),
                Some(&IndexOptions::default()),
                &mut rng,
                &mut sink,
            )
            .unwrap();

        assert_eq!(report.generated.len(), 9);
        assert_eq!(report.generated.last().map(String::as_str), Some("zettelkasten-index"));
        assert!(sink.get("ZETTEL-0008").is_some());
    }

    #[test]
    fn test_notes_without_index() {
        let mut sink = DryRunSink::new();
        let mut rng = seeded(Some(3));
        let report = runner()
            .notes(4, &NoteOptions::default(), None, &mut rng, &mut sink)
            .unwrap();
        assert_eq!(report.generated.len(), 4);
        assert_eq!(sink.documents, 4);
    }

    #[test]
    fn test_abort_on_write_failure() {
        let mut sink = MemorySink::refusing(["ZETTEL-0002"]);
        let mut rng = seeded(Some(4));
        let err = runner()
            .notes(3, &NoteOptions::default(), None, &mut rng, &mut sink)
            .unwrap_err();
        assert!(err.is_io());
        assert_eq!(sink.ids(), ["ZETTEL-0001".to_string()]);
    }

    #[test]
    fn test_skip_keeps_identifier_reserved() {
        let mut sink = MemorySink::refusing(["ZETTEL-0002"]);
        let mut rng = seeded(Some(5));
        let options = NoteOptions::default()
            .with_link_probability(0.0)
            .with_related_threshold(0)
            .with_related(2..=2);
        let report = runner()
            .with_failure_policy(FailurePolicy::Skip)
            .notes(3, &options, None, &mut rng, &mut sink)
            .unwrap();

        assert_eq!(report.generated.len(), 3);
        assert_eq!(report.written, vec!["ZETTEL-0001", "ZETTEL-0003"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, "ZETTEL-0002");
        assert!(!report.is_complete());
        // Other notes still point at the unwritten one.
        assert!(report.links.iter().any(|l| l.target == "ZETTEL-0002"));
    }

    struct MisconfiguredSink;

    impl DocumentSink for MisconfiguredSink {
        fn write(&mut self, _id: &str, _content: &str) -> Result<()> {
            Err(Error::config("sink target is not configured"))
        }

        fn describe(&self) -> String {
            "misconfigured".to_string()
        }
    }

    #[test]
    fn test_skip_still_aborts_on_fatal_sink_error() {
        let mut sink = MisconfiguredSink;
        let mut rng = seeded(Some(6));
        let err = runner()
            .with_failure_policy(FailurePolicy::Skip)
            .notes(3, &NoteOptions::default(), None, &mut rng, &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_fails_before_generation() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = BatchRunner::load(Some(temp.path()), runner().now).unwrap_err();
        assert!(matches!(err, Error::PlaceholderLoad { .. }));
    }

    #[test]
    fn test_policy_widens_for_large_batches() {
        let runner = runner().with_suffix_policy(SuffixPolicy::default().with_max_attempts(8));
        let small = runner.policy_for(10);
        assert_eq!(small.digits(), 4);
        assert_eq!(small.max_attempts(), 8);
        assert!(runner.policy_for(1_000_000).digits() > 4);
    }
}
