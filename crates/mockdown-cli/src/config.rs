//! Configuration for the mockdown CLI.
//!
//! [`MockdownConfig`] is loaded from a TOML file, `MOCKDOWN_*` environment
//! variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `MOCKDOWN_CONFIG` environment variable
//! 3. XDG default: `~/.config/mockdown/config.toml`
//! 4. Built-in defaults

use confyg::{Confygery, env};
use mockdown_core::traits::ConfigProvider;
use mockdown_core::util::paths::expand_tilde;
use mockdown_core::{Error, Result, SuffixPolicy};
use mockdown_gen::{FailurePolicy, NoteOptions, PostOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output directory for posts under the base path.
pub const DEFAULT_POSTS_DIR: &str = "content/dummy";

/// Output directory for notes under the base path.
pub const DEFAULT_NOTES_DIR: &str = "content/zettelkasten";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the mockdown CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MockdownConfig {
    /// Project name, used in log messages.
    pub project_name: String,

    /// Base path relative output directories are resolved against.
    pub base_path: Option<String>,

    pub placeholders: PlaceholderConfig,
    pub generation: GenerationConfig,
    pub posts: PostsConfig,
    pub notes: NotesConfig,
}

/// Where the vocabulary comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Directory of placeholder YAML lists. Unset means built-in lists.
    pub path: Option<String>,
}

/// Settings shared by every batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fixed seed; unset draws one from the OS.
    pub seed: Option<u64>,

    /// Minimum digits of the collision suffix.
    pub suffix_digits: u32,

    /// Suffixed attempts before a candidate is given up.
    pub max_attempts: u32,

    /// `abort` or `skip`.
    pub on_write_error: FailurePolicy,
}

/// Post batch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    pub output: Option<String>,
    pub count: usize,
    /// Chance that a section ends with a link to an earlier post.
    pub link_probability: f64,
}

/// Note batch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    pub output: Option<String>,
    pub count: usize,
    /// Identifier prefix, e.g. `ZETTEL` for `ZETTEL-0001`.
    pub prefix: String,
    /// Notes needed before related-notes lists are filled.
    pub related_threshold: usize,
    /// Chance of a `See also` link.
    pub link_probability: f64,
    /// Write the tag index page.
    pub index: bool,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for MockdownConfig {
    fn default() -> Self {
        Self {
            project_name: "mockdown".to_string(),
            base_path: None,
            placeholders: PlaceholderConfig::default(),
            generation: GenerationConfig::default(),
            posts: PostsConfig::default(),
            notes: NotesConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let suffix = SuffixPolicy::default();
        Self {
            seed: None,
            suffix_digits: suffix.digits(),
            max_attempts: suffix.max_attempts(),
            on_write_error: FailurePolicy::default(),
        }
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            output: None,
            count: 50,
            link_probability: PostOptions::default().link_probability,
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        let options = NoteOptions::default();
        Self {
            output: None,
            count: 25,
            prefix: options.prefix,
            related_threshold: options.related_threshold,
            link_probability: options.link_probability,
            index: true,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl MockdownConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("MOCKDOWN");
        env_opts.add_section("placeholders");
        env_opts.add_section("generation");
        env_opts.add_section("posts");
        env_opts.add_section("notes");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        config.check()?;
        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("MOCKDOWN_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mockdown").join("config.toml"))
    }

    /// Reject values no batch could run with.
    pub fn check(&self) -> Result<()> {
        for (key, p) in [
            ("posts.link_probability", self.posts.link_probability),
            ("notes.link_probability", self.notes.link_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::config(format!(
                    "{key} must be between 0 and 1, got {p}"
                )));
            }
        }
        if self.notes.prefix.trim().is_empty() {
            return Err(Error::config("notes.prefix must not be empty"));
        }
        if self.generation.max_attempts == 0 {
            return Err(Error::config("generation.max_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Collision policy for every batch.
    pub fn suffix_policy(&self) -> SuffixPolicy {
        SuffixPolicy::default()
            .with_digits(self.generation.suffix_digits)
            .with_max_attempts(self.generation.max_attempts)
    }

    pub fn post_options(&self) -> PostOptions {
        PostOptions::default().with_link_probability(self.posts.link_probability)
    }

    pub fn note_options(&self) -> NoteOptions {
        NoteOptions::default()
            .with_prefix(self.notes.prefix.clone())
            .with_link_probability(self.notes.link_probability)
            .with_related_threshold(self.notes.related_threshold)
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `MOCKDOWN_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "MOCKDOWN", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for MockdownConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn output_path(&self, kind: &str) -> Result<PathBuf> {
        let (configured, default) = match kind {
            "posts" => (&self.posts.output, DEFAULT_POSTS_DIR),
            "notes" => (&self.notes.output, DEFAULT_NOTES_DIR),
            other => {
                return Err(Error::config(format!("Unknown document kind '{other}'")));
            }
        };
        let path = match configured {
            Some(p) => expand_tilde(p),
            None => PathBuf::from(default),
        };
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(self.base_path()?.join(path))
        }
    }

    fn placeholder_path(&self) -> Option<PathBuf> {
        self.placeholders.path.as_deref().map(expand_tilde)
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
