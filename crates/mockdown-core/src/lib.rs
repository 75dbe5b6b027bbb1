//! mockdown core: shared types, errors, the identifier registry, and utilities.
//!
//! This crate provides the foundational types used across all mockdown crates.
//! It has no internal mockdown dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`registry`]: Identifier minting and link-target selection
//! - [`rng`]: Injectable, seedable source of random choices
//! - [`traits`]: Configuration abstraction
//! - [`util`]: Identifier, path, and file utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod registry;
pub mod rng;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use registry::{IdentifierRegistry, SuffixPolicy};
pub use rng::{ChoiceSource, seeded};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::ids::{candidate_from_title, id_from_path, normalize_id, sequence_id, slugify};
