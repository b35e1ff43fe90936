//! Command-line interface for github-stats
//!
//! This module implements the CLI commands around the [`Collector`](crate::github::Collector).
//!
//! ## Commands
//!
//! - **gather**: Load the configuration, run one collection cycle, and write the records
//! - **watch**: Like gather, but repeats the cycle on a fixed interval
//! - **init**: Generate a sample configuration file
//! - **validate**: Check configuration file syntax and repository identifiers
//!
//! Records go to the console's output stream in the selected format, per-repository errors
//! go to its error stream. Configuration is a TOML file, `github-stats.toml` by default.

mod common;
mod config;
mod console;
mod gather;
mod init;
mod run;
mod validate;
mod watch;

pub use console::Console;
pub use gather::{GatherArgs, gather};
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
pub use watch::{WatchArgs, watch};
