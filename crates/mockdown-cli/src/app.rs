//! The mockdown application: logging setup and command dispatch.

use crate::cli::{CliArgs, Command, LinksAction};
use crate::config::MockdownConfig;
use crate::{config_handlers, generate_handlers, links_handlers};
use chrono::{DateTime, FixedOffset, Local};
use mockdown_core::Result;
use mockdown_core::traits::ConfigProvider;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MockdownCli
// ============================================================================

/// The CLI application over a loaded configuration.
pub struct MockdownCli {
    config: MockdownConfig,
    version: String,
    now: Option<DateTime<FixedOffset>>,
}

impl MockdownCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = MockdownConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    pub fn new(config: MockdownConfig) -> Self {
        Self {
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            now: None,
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Pin the clock generated dates are computed from.
    pub fn with_now(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &MockdownConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Records from the libraries' `log` macros are forwarded to the same subscriber.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Posts(generate)) => {
                tracing::info!("{}: generating posts", self.config.project_name());
                generate_handlers::handle_posts(&self.config, &generate, self.now())?;
                Ok(())
            }
            Some(Command::Notes { args: generate, no_index }) => {
                tracing::info!("{}: generating notes", self.config.project_name());
                generate_handlers::handle_notes(&self.config, &generate, no_index, self.now())?;
                Ok(())
            }
            Some(Command::Links(links)) => match links.command {
                LinksAction::Check { dir, json } => links_handlers::handle_check(&dir, json).await,
                LinksAction::Convert { dir, dry_run } => {
                    links_handlers::handle_convert(&dir, dry_run).await
                }
            },
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => {
                println!("mockdown {}", self.version);
                Ok(())
            }
            None => {
                println!("mockdown {}: use --help for usage", self.version);
                Ok(())
            }
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.now.unwrap_or_else(|| Local::now().fixed_offset())
    }
}

// ============================================================================
// Tests
// ============================================================================
