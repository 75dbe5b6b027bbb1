//! Link graph analysis for mockdown content.
//!
//! # Modules
//!
//! - [`graph`]: Documents and their `[[links]]` as a directed multigraph
//! - [`validation`]: Consistency checks (dangling, self, and duplicate ids)
//! - [`stats`]: Degree statistics and rankings

#![doc = include_str!("../README.md")]

pub mod graph;
pub mod stats;
pub mod validation;

pub use graph::LinkGraph;
pub use stats::{DegreeDirection, LinkStats, compute_stats, quick_summary, top_documents_by_degree};
pub use validation::{ValidationIssue, ValidationResult, is_consistent, validate_links};
