//! The link graph.
//!
//! Nodes are document identifiers, edges are `[[target]]` references.
//! Parallel edges are kept: a post that links to the same target from three
//! sections contributes three edges. References to identifiers that are not
//! part of the graph cannot become edges and are recorded as dangling.

use mockdown_content::{link_targets, split_front_matter};
use mockdown_core::util::files::{FindOptions, find_all_files, read_file};
use mockdown_core::{Result, id_from_path};
use mockdown_gen::{BatchReport, LinkRef};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::path::Path;

/// Directed multigraph of documents and their links.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    dangling: Vec<LinkRef>,
    duplicate_ids: Vec<String>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, link targets)` pairs.
    ///
    /// All documents are added before any link, so the order of the input
    /// does not matter.
    pub fn from_documents<I, S, T>(documents: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<T>)>,
        S: Into<String>,
        T: Into<String>,
    {
        let documents: Vec<(String, Vec<String>)> = documents
            .into_iter()
            .map(|(id, links)| (id.into(), links.into_iter().map(Into::into).collect()))
            .collect();

        let mut graph = Self::new();
        for (id, _) in &documents {
            graph.add_document(id);
        }
        for (id, links) in &documents {
            for target in links {
                graph.add_link(id, target);
            }
        }
        graph
    }

    /// Build from the report of a finished batch.
    pub fn from_report(report: &BatchReport) -> Self {
        let mut graph = Self::new();
        for id in &report.generated {
            graph.add_document(id);
        }
        for link in &report.links {
            graph.add_link(&link.source, &link.target);
        }
        graph
    }

    /// Scan a content directory. Each markdown file is a document named by
    /// its file stem; its links are the wikilinks of its body.
    pub async fn scan_dir(dir: &Path) -> Result<Self> {
        let files = find_all_files(dir, FindOptions::markdown()).await?;
        let mut documents = Vec::with_capacity(files.len());
        for file in &files {
            let Some(id) = id_from_path(&file.path) else {
                log::warn!("skipping {}: no usable file stem", file.path.display());
                continue;
            };
            let content = read_file(&file.path).await?;
            let (_, body) = split_front_matter(&content);
            documents.push((id, link_targets(body)));
        }
        log::debug!("scanned {} document(s) in {}", documents.len(), dir.display());
        Ok(Self::from_documents(documents))
    }

    /// Add a document. Returns false (and records the id) if it already exists.
    pub fn add_document(&mut self, id: &str) -> bool {
        if self.index.contains_key(id) {
            self.duplicate_ids.push(id.to_string());
            return false;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        true
    }

    /// Add a link. Returns false (and records it as dangling) if either end
    /// is unknown.
    pub fn add_link(&mut self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&from), Some(&to)) => {
                self.graph.add_edge(from, to, ());
                true
            }
            _ => {
                self.dangling.push(LinkRef {
                    source: source.to_string(),
                    target: target.to_string(),
                });
                false
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn document_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Document identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Every resolved link as `(source, target)`.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
            )
        })
    }

    /// Targets linked from `id` (with repeats).
    pub fn outgoing(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Documents linking to `id` (with repeats).
    pub fn incoming(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    /// Links whose source or target is not a document of the graph.
    pub fn dangling(&self) -> &[LinkRef] {
        &self.dangling
    }

    /// Identifiers that were added more than once.
    pub fn duplicate_ids(&self) -> &[String] {
        &self.duplicate_ids
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, direction)
            .map(|e| {
                let other = match direction {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                self.graph[other].as_str()
            })
            .collect()
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.index
            .get(id)
            .map(|&idx| self.graph.edges_directed(idx, direction).count())
            .unwrap_or(0)
    }
}
