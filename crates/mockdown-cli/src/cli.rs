//! CLI argument parsing and command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI argument types
// ============================================================================

/// Synthetic markdown content for static site development.
#[derive(Parser, Debug)]
#[command(name = "mockdown", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "MOCKDOWN_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a batch of blog posts.
    Posts(GenerateArgs),

    /// Generate a batch of zettelkasten notes and their index.
    Notes {
        #[command(flatten)]
        args: GenerateArgs,

        /// Skip the tag index page.
        #[arg(long)]
        no_index: bool,
    },

    /// Check or convert the links of a content directory.
    Links(LinksCommand),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Flags shared by the generating commands. Each one overrides the
/// configuration value of the same name.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Number of documents to generate.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Output directory.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Generate without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Link subcommands.
#[derive(Parser, Debug)]
pub struct LinksCommand {
    #[command(subcommand)]
    pub command: LinksAction,
}

/// Available link subcommands.
#[derive(Subcommand, Debug)]
pub enum LinksAction {
    /// Validate that every `[[link]]` in a directory resolves.
    Check {
        /// Content directory to scan.
        dir: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rewrite `[[wikilinks]]` into markdown links, in place.
    Convert {
        /// Content directory to rewrite.
        dir: PathBuf,

        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "posts.count").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "posts.count").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["mockdown"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_global_flags() {
        let args = CliArgs::parse_from(["mockdown", "-v", "--config", "/tmp/c.toml", "version"]);
        assert!(args.verbose);
        assert_eq!(args.config.as_deref(), Some("/tmp/c.toml"));
        assert!(matches!(args.command, Some(Command::Version)));
    }

    #[test]
    fn test_posts_command_defaults() {
        let args = CliArgs::parse_from(["mockdown", "posts"]);
        match args.command {
            Some(Command::Posts(g)) => {
                assert!(g.count.is_none());
                assert!(g.output.is_none());
                assert!(g.seed.is_none());
                assert!(!g.dry_run);
            }
            _ => panic!("Expected Posts command"),
        }
    }

    #[test]
    fn test_posts_command_flags() {
        let args = CliArgs::parse_from([
            "mockdown", "posts", "-n", "25", "-o", "out", "--seed", "7", "--dry-run",
        ]);
        match args.command {
            Some(Command::Posts(g)) => {
                assert_eq!(g.count, Some(25));
                assert_eq!(g.output.as_deref(), Some("out"));
                assert_eq!(g.seed, Some(7));
                assert!(g.dry_run);
            }
            _ => panic!("Expected Posts command"),
        }
    }

    #[test]
    fn test_notes_command_no_index() {
        let args = CliArgs::parse_from(["mockdown", "notes", "--count", "3", "--no-index"]);
        match args.command {
            Some(Command::Notes { args, no_index }) => {
                assert_eq!(args.count, Some(3));
                assert!(no_index);
            }
            _ => panic!("Expected Notes command"),
        }
    }

    #[test]
    fn test_links_check_command() {
        let args = CliArgs::parse_from(["mockdown", "links", "check", "content", "--json"]);
        match args.command {
            Some(Command::Links(cmd)) => match cmd.command {
                LinksAction::Check { dir, json } => {
                    assert_eq!(dir, PathBuf::from("content"));
                    assert!(json);
                }
                _ => panic!("Expected Check action"),
            },
            _ => panic!("Expected Links command"),
        }
    }

    #[test]
    fn test_links_convert_command() {
        let args = CliArgs::parse_from(["mockdown", "links", "convert", "content", "--dry-run"]);
        match args.command {
            Some(Command::Links(cmd)) => {
                assert!(matches!(cmd.command, LinksAction::Convert { dry_run: true, .. }));
            }
            _ => panic!("Expected Links command"),
        }
    }

    #[test]
    fn test_links_check_requires_dir() {
        assert!(CliArgs::try_parse_from(["mockdown", "links", "check"]).is_err());
    }

    #[test]
    fn test_config_set_command() {
        let args = CliArgs::parse_from(["mockdown", "config", "set", "posts.count", "10"]);
        match args.command {
            Some(Command::Config(cmd)) => match cmd.command {
                ConfigAction::Set { key, value } => {
                    assert_eq!(key, "posts.count");
                    assert_eq!(value, "10");
                }
                _ => panic!("Expected Set action"),
            },
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_config_init_command() {
        let args = CliArgs::parse_from(["mockdown", "config", "init", "--file", "c.toml", "--force"]);
        match args.command {
            Some(Command::Config(cmd)) => match cmd.command {
                ConfigAction::Init { file, force } => {
                    assert_eq!(file.as_deref(), Some("c.toml"));
                    assert!(force);
                }
                _ => panic!("Expected Init action"),
            },
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_config_export_docker_env() {
        let args = CliArgs::parse_from(["mockdown", "config", "export", "--docker-env"]);
        match args.command {
            Some(Command::Config(cmd)) => {
                assert!(matches!(cmd.command, ConfigAction::Export { docker_env: true }));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
