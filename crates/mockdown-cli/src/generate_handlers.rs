//! Handler functions for `mockdown posts` and `mockdown notes`.

use crate::cli::GenerateArgs;
use crate::config::MockdownConfig;
use chrono::{DateTime, FixedOffset};
use mockdown_core::traits::ConfigProvider;
use mockdown_core::util::paths::expand_tilde;
use mockdown_core::{Result, seeded};
use mockdown_gen::{BatchReport, BatchRunner, DocumentSink, DryRunSink, FsSink, IndexOptions};
use std::path::{Path, PathBuf};

// ============================================================================
// Handlers
// ============================================================================

/// Generate a post batch.
pub fn handle_posts(
    config: &MockdownConfig,
    args: &GenerateArgs,
    now: DateTime<FixedOffset>,
) -> Result<BatchReport> {
    let runner = batch_runner(config, now)?;
    let count = args.count.unwrap_or(config.posts.count);
    let dir = output_dir(config, args, "posts")?;
    let options = config.post_options();
    let mut rng = seeded(args.seed.or(config.generation.seed));

    run_batch("post", &dir, args.dry_run, |sink| {
        runner.posts(count, &options, &mut rng, sink)
    })
}

/// Generate a note batch, plus the index page unless disabled.
pub fn handle_notes(
    config: &MockdownConfig,
    args: &GenerateArgs,
    no_index: bool,
    now: DateTime<FixedOffset>,
) -> Result<BatchReport> {
    let runner = batch_runner(config, now)?;
    let count = args.count.unwrap_or(config.notes.count);
    let dir = output_dir(config, args, "notes")?;
    let options = config.note_options();
    let index = (config.notes.index && !no_index).then(IndexOptions::default);
    let mut rng = seeded(args.seed.or(config.generation.seed));

    run_batch("note", &dir, args.dry_run, |sink| {
        runner.notes(count, &options, index.as_ref(), &mut rng, sink)
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Runner with the configured vocabulary and policies. Fails before any
/// document exists if the placeholders cannot be loaded.
fn batch_runner(config: &MockdownConfig, now: DateTime<FixedOffset>) -> Result<BatchRunner> {
    let placeholders = config.placeholder_path();
    if let Some(ref dir) = placeholders {
        tracing::debug!("loading placeholders from {}", dir.display());
    }
    Ok(BatchRunner::load(placeholders.as_deref(), now)?
        .with_failure_policy(config.generation.on_write_error)
        .with_suffix_policy(config.suffix_policy()))
}

fn output_dir(config: &MockdownConfig, args: &GenerateArgs, kind: &str) -> Result<PathBuf> {
    match &args.output {
        Some(p) => Ok(expand_tilde(p)),
        None => config.output_path(kind),
    }
}

fn run_batch<F>(noun: &str, dir: &Path, dry_run: bool, batch: F) -> Result<BatchReport>
where
    F: FnOnce(&mut dyn DocumentSink) -> Result<BatchReport>,
{
    if dry_run {
        let mut sink = DryRunSink::new();
        let report = batch(&mut sink)?;
        print_report(noun, &report);
        println!(
            "Dry run: {} file(s), {} bytes; nothing written to {}.",
            sink.documents,
            sink.bytes,
            dir.display()
        );
        Ok(report)
    } else {
        let mut sink = FsSink::create(dir)?;
        let report = batch(&mut sink)?;
        print_report(noun, &report);
        println!("Written to {}", sink.dir().display());
        Ok(report)
    }
}

fn print_report(noun: &str, report: &BatchReport) {
    println!(
        "Generated {} {noun}(s) with {} link(s)",
        report.generated.len(),
        report.links.len()
    );
    if !report.failures.is_empty() {
        println!("Skipped {} unwritable file(s):", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.id, failure.error);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
