//! The `mockdown` command-line tool.
//!
//! # Modules
//!
//! - [`cli`]: clap argument definitions
//! - [`config`]: `MockdownConfig`, loaded with confyg
//! - [`app`]: Logging setup and command dispatch
//! - [`generate_handlers`]: `posts` and `notes`
//! - [`links_handlers`]: `links check` and `links convert`
//! - [`config_handlers`]: `config path|get|set|init|export`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod generate_handlers;
pub mod links_handlers;

pub use app::MockdownCli;
pub use cli::CliArgs;
pub use config::MockdownConfig;
