//! Core traits for mockdown.
//!
//! [`ConfigProvider`] abstracts where generated content goes and where the
//! placeholder word lists come from, so generators and handlers can run
//! against a file-backed configuration or an in-memory test fixture.

use std::path::PathBuf;

use crate::Result;

/// Trait for resolved mockdown configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use mockdown_core::traits::ConfigProvider;
/// use mockdown_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     root: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "demo-site"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.root.clone())
///     }
///
///     fn output_path(&self, kind: &str) -> Result<PathBuf> {
///         Ok(self.root.join("content").join(kind))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for log messages and default paths.
    fn project_name(&self) -> &str;

    /// Base path that relative output paths are resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Output directory for a document kind (`"posts"`, `"notes"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is unknown or the path cannot be
    /// resolved.
    fn output_path(&self, kind: &str) -> Result<PathBuf>;

    /// Directory holding the placeholder YAML lists.
    ///
    /// `None` means the built-in vocabulary is used.
    fn placeholder_path(&self) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct FixtureConfig {
        root: PathBuf,
    }

    impl ConfigProvider for FixtureConfig {
        fn project_name(&self) -> &str {
            "fixture"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.root.clone())
        }

        fn output_path(&self, kind: &str) -> Result<PathBuf> {
            match kind {
                "posts" | "notes" => Ok(self.root.join(kind)),
                other => Err(crate::Error::config(format!("Unknown kind: {other}"))),
            }
        }
    }

    #[test]
    fn test_output_path_known_kind() {
        let config = FixtureConfig {
            root: PathBuf::from("/site"),
        };
        assert_eq!(
            config.output_path("notes").unwrap(),
            PathBuf::from("/site/notes")
        );
        assert!(config.output_path("slides").is_err());
    }

    #[test]
    fn test_placeholder_path_defaults_to_builtin() {
        let config = FixtureConfig {
            root: PathBuf::from("/site"),
        };
        assert!(config.placeholder_path().is_none());
        assert_eq!(config.project_name(), "fixture");
    }
}
