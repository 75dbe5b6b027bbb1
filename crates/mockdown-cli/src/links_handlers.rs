//! Handler functions for `mockdown links {check,convert}`.

use mockdown_content::{LinkIndex, convert_wikilinks};
use mockdown_core::util::files::{FindOptions, find_all_files, read_file, write_file};
use mockdown_core::{Error, Result};
use mockdown_graph::{LinkGraph, LinkStats, ValidationResult, compute_stats, validate_links};
use serde::Serialize;
use std::path::Path;

// ============================================================================
// links check
// ============================================================================

/// Validation and statistics for one directory.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub validation: ValidationResult,
    pub stats: LinkStats,
}

/// Scan `dir` and validate its link graph.
pub async fn check_links(dir: &Path) -> Result<CheckReport> {
    let graph = LinkGraph::scan_dir(dir).await?;
    Ok(CheckReport {
        validation: validate_links(&graph),
        stats: compute_stats(&graph),
    })
}

/// Print the check for `dir`; an invalid graph is an error.
pub async fn handle_check(dir: &Path, json: bool) -> Result<()> {
    let report = check_links(dir).await?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| Error::serialization(e.to_string()))?;
        println!("{out}");
    } else {
        print_check(dir, &report);
    }

    if report.validation.valid {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Link validation failed with {} error(s)",
            report.validation.errors.len()
        )))
    }
}

fn print_check(dir: &Path, report: &CheckReport) {
    let CheckReport { validation, stats } = report;

    if validation.valid {
        println!("Links in {} are consistent.", dir.display());
    } else {
        println!("Links in {} have validation issues:", dir.display());
    }

    for error in &validation.errors {
        println!("  ERROR [{}]: {}", error.code, error.message);
        for item in error.documents.iter().chain(error.links.iter()) {
            println!("    - {item}");
        }
    }
    for warning in &validation.warnings {
        println!("  WARN  [{}]: {}", warning.code, warning.message);
        for item in &warning.documents {
            println!("    - {item}");
        }
    }
    for info in &validation.info {
        println!("  INFO  [{}]: {}", info.code, info.message);
    }

    println!();
    println!("Documents:      {}", stats.documents);
    println!("Links:          {}", stats.links);
    println!("  Unique:       {}", stats.unique_links);
    println!("  Dangling:     {}", stats.dangling);
    println!("Orphans:        {}", stats.orphans);
    println!("Avg degree:     {:.2}", stats.avg_degree);
    if let Some(ref id) = stats.most_linked {
        println!("Most linked:    {id} (in-degree: {})", stats.max_in_degree);
    }
    if let Some(ref id) = stats.most_linking {
        println!("Most linking:   {id} (out-degree: {})", stats.max_out_degree);
    }

    println!(
        "\nSummary: {} error(s), {} warning(s)",
        validation.errors.len(),
        validation.warnings.len()
    );
}

// ============================================================================
// links convert
// ============================================================================

/// Totals of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Markdown files scanned.
    pub files: usize,
    /// Files whose content changed.
    pub changed: usize,
    /// Links and embeds rewritten.
    pub converted: usize,
    /// Links left as broken-link spans.
    pub broken: usize,
}

/// Rewrite every wikilink under `dir` into a markdown link.
pub async fn convert_dir(dir: &Path, dry_run: bool) -> Result<ConvertSummary> {
    let files = find_all_files(dir, FindOptions::markdown()).await?;
    let index = LinkIndex::from_files(&files);
    let mut summary = ConvertSummary {
        files: files.len(),
        ..Default::default()
    };

    for file in &files {
        let content = read_file(&file.path).await?;
        let conversion = convert_wikilinks(&content, &index);
        if !conversion.changed() {
            continue;
        }

        summary.changed += 1;
        summary.converted += conversion.converted;
        summary.broken += conversion.broken.len();
        if !dry_run {
            write_file(&file.path, &conversion.content).await?;
        }
        tracing::debug!(
            "{}: {} link(s) converted",
            file.relative_path.display(),
            conversion.converted
        );
    }

    Ok(summary)
}

pub async fn handle_convert(dir: &Path, dry_run: bool) -> Result<()> {
    let summary = convert_dir(dir, dry_run).await?;

    println!(
        "Converted {} link(s) in {} of {} file(s)",
        summary.converted, summary.changed, summary.files
    );
    if summary.broken > 0 {
        println!("Broken links: {}", summary.broken);
    }
    if dry_run {
        println!("Dry run; no files were modified.");
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn test_check_links_consistent() {
        let temp = tempfile::TempDir::new().unwrap();
        write(temp.path(), "a.md", "---\ntitle: \"A\"\n---\n\nnothing\n");
        write(temp.path(), "b.md", "see [[a]]\n");

        let report = check_links(temp.path()).await.unwrap();
        assert!(report.validation.valid);
        assert_eq!(report.stats.documents, 2);
        assert!(handle_check(temp.path(), false).await.is_ok());
        assert!(handle_check(temp.path(), true).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_links_dangling_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        write(temp.path(), "a.md", "see [[nowhere]]\n");

        let report = check_links(temp.path()).await.unwrap();
        assert!(!report.validation.valid);
        assert!(handle_check(temp.path(), false).await.is_err());
    }

    #[tokio::test]
    async fn test_check_missing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(check_links(&temp.path().join("missing")).await.is_err());
    }

    #[tokio::test]
    async fn test_convert_dir_rewrites_in_place() {
        let temp = tempfile::TempDir::new().unwrap();
        write(temp.path(), "alpha.md", "intro\n");
        write(temp.path(), "beta.md", "see [[alpha]] and [[ghost]]\n");

        let summary = convert_dir(temp.path(), false).await.unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.broken, 1);

        let beta = std::fs::read_to_string(temp.path().join("beta.md")).unwrap();
        assert!(beta.contains("[alpha](/alpha)"));
        assert!(beta.contains("<span class=\"broken-link\">ghost</span>"));
        assert!(!beta.contains("[["));
    }

    #[tokio::test]
    async fn test_convert_dir_dry_run_leaves_files() {
        let temp = tempfile::TempDir::new().unwrap();
        write(temp.path(), "alpha.md", "intro\n");
        write(temp.path(), "beta.md", "see [[alpha]]\n");

        let summary = convert_dir(temp.path(), true).await.unwrap();
        assert_eq!(summary.converted, 1);
        assert_eq!(
            std::fs::read_to_string(temp.path().join("beta.md")).unwrap(),
            "see [[alpha]]\n"
        );
        assert!(handle_convert(temp.path(), true).await.is_ok());
    }
}
