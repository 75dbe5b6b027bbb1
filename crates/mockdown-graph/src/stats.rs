//! Link statistics.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::LinkGraph;

// ============================================================================
// Types
// ============================================================================

/// Summary numbers for a link graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    pub documents: usize,
    /// Resolved links, repeats included.
    pub links: usize,
    /// Distinct `(source, target)` pairs.
    pub unique_links: usize,
    /// Links that could not be resolved.
    pub dangling: usize,
    /// Documents with no links in or out.
    pub orphans: usize,
    /// Average links per document (in + out).
    pub avg_degree: f32,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    /// Document linked to most often.
    pub most_linked: Option<String>,
    /// Document with the most outgoing links.
    pub most_linking: Option<String>,
}

/// Direction for degree ranking.
#[derive(Clone, Copy, Debug)]
pub enum DegreeDirection {
    In,
    Out,
    Both,
}

// ============================================================================
// Functions
// ============================================================================

pub fn compute_stats(graph: &LinkGraph) -> LinkStats {
    let documents = graph.document_count();
    let links = graph.link_count();
    let unique_links = graph.links().collect::<HashSet<_>>().len();

    let orphans = graph
        .ids()
        .filter(|id| graph.in_degree(id) == 0 && graph.out_degree(id) == 0)
        .count();

    let avg_degree = if documents > 0 {
        (2 * links) as f32 / documents as f32
    } else {
        0.0
    };

    let (most_linked, max_in_degree) = leader(graph, DegreeDirection::In);
    let (most_linking, max_out_degree) = leader(graph, DegreeDirection::Out);

    LinkStats {
        documents,
        links,
        unique_links,
        dangling: graph.dangling().len(),
        orphans,
        avg_degree,
        max_in_degree,
        max_out_degree,
        most_linked,
        most_linking,
    }
}

/// One-line size summary.
pub fn quick_summary(graph: &LinkGraph) -> String {
    format!(
        "{} documents, {} links",
        graph.document_count(),
        graph.link_count()
    )
}

/// Top `limit` documents by degree. Ties keep insertion order.
pub fn top_documents_by_degree(
    graph: &LinkGraph,
    limit: usize,
    direction: DegreeDirection,
) -> Vec<(String, usize)> {
    let mut scores: Vec<(String, usize)> = graph
        .ids()
        .map(|id| (id.to_string(), degree(graph, id, direction)))
        .collect();

    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores.truncate(limit);
    scores
}

fn degree(graph: &LinkGraph, id: &str, direction: DegreeDirection) -> usize {
    match direction {
        DegreeDirection::In => graph.in_degree(id),
        DegreeDirection::Out => graph.out_degree(id),
        DegreeDirection::Both => graph.in_degree(id) + graph.out_degree(id),
    }
}

// Only a document with at least one link leads.
fn leader(graph: &LinkGraph, direction: DegreeDirection) -> (Option<String>, usize) {
    match top_documents_by_degree(graph, 1, direction).pop() {
        Some((id, n)) if n > 0 => (Some(id), n),
        _ => (None, 0),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinkGraph {
        LinkGraph::from_documents(vec![
            ("a", vec![]),
            ("b", vec!["a"]),
            ("c", vec!["a", "b", "a"]),
            ("lonely", vec![]),
            ("d", vec!["ghost"]),
        ])
    }

    #[test]
    fn test_compute_stats_counts() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.documents, 5);
        assert_eq!(stats.links, 4);
        assert_eq!(stats.unique_links, 3);
        assert_eq!(stats.dangling, 1);
        // "lonely" and "d" (its only link is dangling)
        assert_eq!(stats.orphans, 2);
    }

    #[test]
    fn test_compute_stats_degrees() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.max_in_degree, 3);
        assert_eq!(stats.most_linked.as_deref(), Some("a"));
        assert_eq!(stats.max_out_degree, 3);
        assert_eq!(stats.most_linking.as_deref(), Some("c"));
        assert!((stats.avg_degree - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&LinkGraph::new());
        assert_eq!(stats.documents, 0);
        assert_eq!(stats.avg_degree, 0.0);
        assert!(stats.most_linked.is_none());
        assert!(stats.most_linking.is_none());
    }

    #[test]
    fn test_quick_summary() {
        assert_eq!(quick_summary(&sample()), "5 documents, 4 links");
    }

    #[test]
    fn test_top_documents_by_degree() {
        let graph = sample();
        let top = top_documents_by_degree(&graph, 2, DegreeDirection::Both);
        assert_eq!(top, vec![("a".to_string(), 3), ("c".to_string(), 3)]);

        let out = top_documents_by_degree(&graph, 10, DegreeDirection::Out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], ("c".to_string(), 3));
    }
}
