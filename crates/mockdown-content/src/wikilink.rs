//! Wikilink parsing.
//!
//! Recognised forms:
//!
//! - `[[target]]`
//! - `[[target#heading]]`
//! - `[[target|alias]]` and `[[target#heading|alias]]`
//! - `![[file]]` / `![[file|alias]]` embeds

use regex::Regex;
use std::sync::LazyLock;

/// Any wikilink, with an optional leading `!` marking an embed.
pub(crate) static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!)?\[\[([^\[\]|#]+?)(?:#([^|\]]+))?(?:\|([^\[\]]+))?\]\]")
        .expect("valid wikilink regex")
});

/// A parsed `[[...]]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Referenced document or file, trimmed.
    pub target: String,
    /// Heading fragment after `#`.
    pub heading: Option<String>,
    /// Display text after `|`.
    pub alias: Option<String>,
    /// True for `![[...]]`.
    pub embed: bool,
}

impl WikiLink {
    /// Text shown for the link: the alias, or the target itself.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.target)
    }
}

/// Every wikilink in `text`, in order of appearance.
pub fn extract_wikilinks(text: &str) -> Vec<WikiLink> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let target = caps.get(2)?.as_str().trim();
            if target.is_empty() {
                return None;
            }
            Some(WikiLink {
                target: target.to_string(),
                heading: caps.get(3).map(|m| m.as_str().trim().to_string()),
                alias: caps.get(4).map(|m| m.as_str().trim().to_string()),
                embed: caps.get(1).is_some(),
            })
        })
        .collect()
}

/// Targets of the non-embed links in `text`, in order (duplicates kept).
pub fn link_targets(text: &str) -> Vec<String> {
    extract_wikilinks(text)
        .into_iter()
        .filter(|l| !l.embed)
        .map(|l| l.target)
        .collect()
}
