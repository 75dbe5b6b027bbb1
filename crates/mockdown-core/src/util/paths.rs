//! Path resolution utilities.
//!
//! Generic path helpers shared by the CLI and the generators.

use std::path::{Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use mockdown_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/content");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Site URL path for a content file relative to its content root.
///
/// `notes/ZETTEL-0001.md` becomes `/notes/ZETTEL-0001`.
pub fn url_path(relative: &Path) -> String {
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let trimmed = joined
        .strip_suffix(".markdown")
        .or_else(|| joined.strip_suffix(".md"))
        .unwrap_or(&joined);
    format!("/{trimmed}")
}

/// Create `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> crate::Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| crate::Error::io_with_path(e, dir))
}
