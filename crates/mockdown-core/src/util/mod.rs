//! Utility modules for identifiers, paths, and file discovery.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`ids`]: Slugs, sequential identifiers, and link-key normalisation
//! - [`paths`]: Path helpers (tilde expansion, site URL paths)

pub mod files;
pub mod ids;
pub mod paths;
