//! Wikilink to markdown link conversion.
//!
//! Static site generators do not understand `[[id]]`. [`convert_wikilinks`]
//! rewrites them into ordinary markdown links using a [`LinkIndex`] built
//! from the content tree. Links that resolve nowhere become a
//! `broken-link` span so the site still renders.

use mockdown_core::util::files::FileInfo;
use mockdown_core::util::paths::url_path;
use mockdown_core::{normalize_id, slugify};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::wikilink::WIKILINK_RE;

static EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[\[([^\[\]|]+?)(?:\|([^\[\]]+))?\]\]").expect("valid embed regex")
});

// ============================================================================
// LinkIndex
// ============================================================================

/// Lookup table from link keys to site URL paths.
///
/// Each file is reachable by its lower-cased relative path (without
/// extension) and by the slug of its file stem.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    entries: HashMap<String, Vec<String>>,
    files: usize,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index discovered files.
    pub fn from_files(files: &[FileInfo]) -> Self {
        let mut index = Self::new();
        for file in files {
            index.insert(&file.relative_path);
        }
        index
    }

    /// Add one file, given relative to the content root.
    pub fn insert(&mut self, relative: &Path) {
        let url = url_path(relative);
        let clean = normalize_id(&relative.to_string_lossy());
        let clean = clean
            .strip_suffix(".markdown")
            .map(str::to_string)
            .unwrap_or(clean);
        let stem = clean.rsplit('/').next().unwrap_or(&clean);
        let slug = slugify(stem);

        self.push(clean.clone(), &url);
        if !slug.is_empty() && slug != clean {
            self.push(slug, &url);
        }
        self.files += 1;
    }

    fn push(&mut self, key: String, url: &str) {
        let urls = self.entries.entry(key).or_default();
        if !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }

    /// Resolve a link target to a URL path.
    ///
    /// Tried in order: the exact lower-cased path, its last segment, then
    /// the slug of each. When several files share a key the first indexed
    /// one wins.
    pub fn resolve(&self, target: &str) -> Option<&str> {
        let key = normalize_id(target);
        if key.is_empty() {
            return None;
        }
        let last = key.rsplit('/').next().unwrap_or(&key);

        let mut keys = vec![key.clone(), last.to_string(), slugify(&key), slugify(last)];
        keys.dedup();

        for k in keys {
            if let Some(urls) = self.entries.get(&k) {
                if let Some(first) = urls.first() {
                    if urls.len() > 1 {
                        log::warn!(
                            "ambiguous link '{target}' -> {first} (candidates: {})",
                            urls.join(", ")
                        );
                    }
                    return Some(first);
                }
            }
        }
        None
    }

    /// Number of files indexed.
    pub fn len(&self) -> usize {
        self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Outcome of converting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Rewritten text.
    pub content: String,
    /// Links and embeds rewritten to markdown.
    pub converted: usize,
    /// Targets that could not be resolved, in order of appearance.
    pub broken: Vec<String>,
}

impl Conversion {
    /// True if anything was rewritten.
    pub fn changed(&self) -> bool {
        self.converted > 0 || !self.broken.is_empty()
    }
}

/// Rewrite every wikilink and embed in `text`.
///
/// Embeds become images (`![alt](url)`), falling back to the raw file name
/// when the index has no match. Links become `[label](url#heading)`, or a
/// `broken-link` span when unresolved.
pub fn convert_wikilinks(text: &str, index: &LinkIndex) -> Conversion {
    let mut converted = 0;
    let mut broken = Vec::new();

    let embedded = EMBED_RE.replace_all(text, |caps: &Captures| {
        let file = caps[1].trim();
        let alt = match caps.get(2) {
            Some(alias) => alias.as_str().trim().to_string(),
            None => display_name(file).to_string(),
        };
        let url = index.resolve(file).unwrap_or(file);
        converted += 1;
        format!("![{alt}]({url})")
    });

    let linked = WIKILINK_RE.replace_all(&embedded, |caps: &Captures| {
        // Embeds were handled above; anything left with `!` is kept verbatim.
        if caps.get(1).is_some() {
            return caps[0].to_string();
        }
        let target = caps[2].trim();
        let label = caps
            .get(4)
            .map(|m| m.as_str().trim())
            .unwrap_or(target);
        match index.resolve(target) {
            Some(url) => {
                converted += 1;
                match caps.get(3) {
                    Some(heading) => format!("[{label}]({url}#{})", heading.as_str().trim()),
                    None => format!("[{label}]({url})"),
                }
            }
            None => {
                log::warn!("broken link: '{target}'");
                broken.push(target.to_string());
                format!("<span class=\"broken-link\">{label}</span>")
            }
        }
    });

    Conversion {
        content: linked.into_owned(),
        converted,
        broken,
    }
}

/// File name without its extension; URLs are shown whole.
fn display_name(file: &str) -> &str {
    if file.starts_with("http://") || file.starts_with("https://") {
        return file;
    }
    match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn index() -> LinkIndex {
        let mut index = LinkIndex::new();
        index.insert(Path::new("notes/ZETTEL-0001.md"));
        index.insert(Path::new("posts/hello-world.md"));
        index.insert(Path::new("posts/Big Ideas.markdown"));
        index
    }

    #[test]
    fn test_resolve_exact_path() {
        let index = index();
        assert_eq!(index.resolve("notes/zettel-0001"), Some("/notes/ZETTEL-0001"));
        assert_eq!(index.resolve("/posts/hello-world.md"), Some("/posts/hello-world"));
    }

    #[test]
    fn test_resolve_by_slug() {
        let index = index();
        assert_eq!(index.resolve("ZETTEL-0001"), Some("/notes/ZETTEL-0001"));
        assert_eq!(index.resolve("Big Ideas"), Some("/posts/Big Ideas"));
        assert_eq!(index.resolve("elsewhere/hello-world"), Some("/posts/hello-world"));
    }

    #[test]
    fn test_resolve_missing() {
        let index = index();
        assert_eq!(index.resolve("nowhere"), None);
        assert_eq!(index.resolve("  "), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_from_files() {
        let files = vec![FileInfo {
            path: PathBuf::from("/site/content/a.md"),
            stem: "a".into(),
            relative_path: PathBuf::from("a.md"),
        }];
        let index = LinkIndex::from_files(&files);
        assert_eq!(index.resolve("a"), Some("/a"));
        assert!(!index.is_empty());
    }

    #[test]
    fn test_convert_links() {
        let result = convert_wikilinks(
            "See [[ZETTEL-0001]] and [[hello-world#Intro|the post]].",
            &index(),
        );
        assert_eq!(
            result.content,
            "See [ZETTEL-0001](/notes/ZETTEL-0001) and [the post](/posts/hello-world#Intro)."
        );
        assert_eq!(result.converted, 2);
        assert!(result.broken.is_empty());
        assert!(result.changed());
    }

    #[test]
    fn test_convert_broken_link() {
        let result = convert_wikilinks("Gone: [[missing-note|old]]", &index());
        assert_eq!(result.content, "Gone: <span class=\"broken-link\">old</span>");
        assert_eq!(result.broken, vec!["missing-note"]);
        assert_eq!(result.converted, 0);
    }

    #[test]
    fn test_convert_embeds() {
        let result = convert_wikilinks("![[diagram.png]] ![[photo.jpg|Sunset]]", &index());
        assert_eq!(result.content, "![diagram](diagram.png) ![Sunset](photo.jpg)");
        assert_eq!(result.converted, 2);
    }

    #[test]
    fn test_convert_without_links_is_unchanged() {
        let text = "Nothing to see, [regular](https://example.com).";
        let result = convert_wikilinks(text, &index());
        assert_eq!(result.content, text);
        assert!(!result.changed());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("a.b.png"), "a.b");
        assert_eq!(display_name(".hidden"), ".hidden");
        assert_eq!(display_name("https://x.org/a.png"), "https://x.org/a.png");
    }
}
