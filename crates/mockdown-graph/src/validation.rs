//! Link graph validation.
//!
//! A batch is consistent when every identifier is unique, no document links
//! to itself, and every link target exists. Orphans (documents with no links
//! in or out) are legal but reported.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::LinkGraph;

// ============================================================================
// Types
// ============================================================================

/// Result of link validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when there are no errors.
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            info: Vec::new(),
        }
    }

    /// Add an error (marks the result invalid).
    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    pub fn add_info(&mut self, issue: ValidationIssue) {
        self.info.push(issue);
    }

    /// Errors plus warnings.
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// First error or warning with `code`.
    pub fn find(&self, code: &str) -> Option<&ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
            .find(|i| i.code == code)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// One class of problem found in the graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable code, e.g. `DANGLING_LINKS`.
    pub code: String,
    pub message: String,
    /// Affected documents.
    pub documents: Vec<String>,
    /// Affected links as `source -> target`.
    pub links: Vec<String>,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            documents: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_documents(mut self, documents: Vec<String>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Run every check against `graph`.
pub fn validate_links(graph: &LinkGraph) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_duplicate_ids(graph, &mut result);
    check_self_links(graph, &mut result);
    check_dangling(graph, &mut result);
    check_orphans(graph, &mut result);
    check_repeated_links(graph, &mut result);

    result
}

/// Shorthand for `validate_links(graph).valid`.
pub fn is_consistent(graph: &LinkGraph) -> bool {
    validate_links(graph).valid
}

fn check_duplicate_ids(graph: &LinkGraph, result: &mut ValidationResult) {
    let duplicates = graph.duplicate_ids();
    if !duplicates.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DUPLICATE_IDS",
                format!("{} identifier(s) used more than once", duplicates.len()),
            )
            .with_documents(duplicates.to_vec()),
        );
    }
}

fn check_self_links(graph: &LinkGraph, result: &mut ValidationResult) {
    let self_links: Vec<String> = graph
        .links()
        .filter(|(source, target)| source == target)
        .map(|(source, target)| format!("{source} -> {target}"))
        .collect();

    if !self_links.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "SELF_LINKS",
                format!("{} link(s) point at their own document", self_links.len()),
            )
            .with_links(self_links),
        );
    }
}

fn check_dangling(graph: &LinkGraph, result: &mut ValidationResult) {
    let dangling: Vec<String> = graph
        .dangling()
        .iter()
        .map(|l| format!("{} -> {}", l.source, l.target))
        .collect();

    if !dangling.is_empty() {
        result.add_error(
            ValidationIssue::new(
                "DANGLING_LINKS",
                format!("{} link(s) point at missing documents", dangling.len()),
            )
            .with_links(dangling),
        );
    }
}

fn check_orphans(graph: &LinkGraph, result: &mut ValidationResult) {
    let orphans: Vec<String> = graph
        .ids()
        .filter(|id| graph.in_degree(id) == 0 && graph.out_degree(id) == 0)
        .map(str::to_string)
        .collect();

    // A single document has nothing to link to.
    if !orphans.is_empty() && graph.document_count() > 1 {
        result.add_warning(
            ValidationIssue::new(
                "ORPHAN_DOCUMENTS",
                format!("{} document(s) have no links", orphans.len()),
            )
            .with_documents(orphans),
        );
    }
}

fn check_repeated_links(graph: &LinkGraph, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    let mut repeated = HashSet::new();
    for link in graph.links() {
        if !seen.insert(link) {
            repeated.insert(link);
        }
    }

    if !repeated.is_empty() {
        let mut links: Vec<String> = repeated
            .into_iter()
            .map(|(source, target)| format!("{source} -> {target}"))
            .collect();
        links.sort();
        result.add_info(
            ValidationIssue::new(
                "REPEATED_LINKS",
                format!("{} link(s) appear more than once in a document", links.len()),
            )
            .with_links(links),
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
