//! Identifier derivation helpers.
//!
//! Candidate identifiers come from two places: a slugified title (posts,
//! index pages) or a zero-padded sequence number (notes).

use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Fallback candidate for titles that slugify to nothing.
pub const UNTITLED: &str = "untitled";

/// Convert free text into a URL- and filename-safe slug.
///
/// Decomposes the text (NFKD) so accented letters keep their base letter,
/// then lowercases ASCII letters, keeps ASCII digits, turns whitespace and
/// hyphen runs into a single `-`, and drops everything else. Returns an
/// empty string when nothing survives.
///
/// # Example
///
/// ```
/// use mockdown_core::util::ids::slugify;
///
/// assert_eq!(slugify("Hello,  World!"), "hello-world");
/// assert_eq!(slugify("  --Rust & Go-- "), "rust-go");
/// assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.nfkd().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        }
    }

    out
}

/// Slugify `title`, falling back to [`UNTITLED`] when it slugifies to nothing.
pub fn candidate_from_title(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        UNTITLED.to_string()
    } else {
        slug
    }
}

/// Format a sequential identifier such as `ZETTEL-0001`.
pub fn sequence_id(prefix: &str, n: usize, width: usize) -> String {
    format!("{prefix}-{n:0width$}")
}

/// Extract an identifier (file stem) from a path.
pub fn id_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Normalise a link key for case-insensitive lookups.
///
/// Trims whitespace, lowercases, converts `\` to `/`, strips leading `/`
/// and `./`, and drops a trailing `.md`.
pub fn normalize_id(raw: &str) -> String {
    let mut key = raw.trim().replace('\\', "/").to_lowercase();
    while let Some(rest) = key.strip_prefix("./") {
        key = rest.to_string();
    }
    let key = key.trim_start_matches('/');
    key.strip_suffix(".md").unwrap_or(key).to_string()
}
