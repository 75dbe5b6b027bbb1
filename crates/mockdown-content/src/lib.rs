//! Content building blocks for mockdown.
//!
//! Everything a generator needs to turn random choices into markdown, and
//! everything the link tooling needs to read it back.
//!
//! # Modules
//!
//! - [`vocabulary`]: Placeholder word lists
//! - [`document`]: Document model and per-kind front matter
//! - [`frontmatter`]: Front matter rendering and extraction
//! - [`markdown`]: Markdown element templates
//! - [`wikilink`]: `[[...]]` parsing
//! - [`convert`]: Wikilink to markdown link conversion

#![doc = include_str!("../README.md")]

pub mod convert;
pub mod document;
pub mod frontmatter;
pub mod markdown;
pub mod vocabulary;
pub mod wikilink;

pub use convert::{Conversion, LinkIndex, convert_wikilinks};
pub use document::{Document, DocumentKind, FrontMatter, IndexMeta, NoteMeta, PostMeta};
pub use frontmatter::{DATE_FORMAT, parse_front_matter, split_front_matter};
pub use markdown::{Element, wikilink};
pub use vocabulary::{Vocabulary, WordList};
pub use wikilink::{WikiLink, extract_wikilinks, link_targets};
