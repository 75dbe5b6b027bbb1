//! Document generators for mockdown.
//!
//! # Modules
//!
//! - [`options`]: Tunables for posts, notes, and the index, plus the write
//!   failure policy
//! - [`post`]: Slug-identified blog posts
//! - [`note`]: Sequentially identified zettelkasten notes
//! - [`index`]: Tag index over a note batch
//! - [`sink`]: Where rendered documents go
//! - [`batch`]: Runs a whole batch and reports what happened

#![doc = include_str!("../README.md")]

pub mod batch;
pub mod index;
pub mod note;
pub mod options;
pub mod post;
pub mod sink;

pub use batch::{BatchReport, BatchRunner, LinkRef, WriteFailure};
pub use index::IndexGenerator;
pub use note::NoteGenerator;
pub use options::{FailurePolicy, IndexOptions, NoteOptions, PostOptions};
pub use post::PostGenerator;
pub use sink::{DocumentSink, DryRunSink, FsSink, MemorySink};
