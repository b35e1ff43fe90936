//! Command dispatch logic for github-stats

use super::{Console, GatherArgs, InitArgs, ValidateArgs, WatchArgs, gather, init_config, validate_config, watch};
use crate::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "github-stats", author, version, long_about = None, display_name = "github-stats")]
#[command(about = "Collect popularity and usage metrics for GitHub repositories")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: StatsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StatsSubcommand {
    /// Collect metrics for every configured repository once
    Gather(Box<GatherArgs>),
    /// Collect metrics periodically
    Watch(Box<WatchArgs>),
    /// Generate a sample configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, C>(console: &mut C, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    C: Console,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        StatsSubcommand::Gather(gather_args) => gather(console, gather_args).await,
        StatsSubcommand::Watch(watch_args) => watch(console, watch_args).await,
        StatsSubcommand::Init(init_args) => init_config(console, init_args),
        StatsSubcommand::Validate(validate_args) => validate_config(console, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gather_defaults() {
        let cli = Cli::try_parse_from(["github-stats", "gather"]).unwrap();
        let StatsSubcommand::Gather(args) = cli.command else {
            panic!("expected gather");
        };

        assert!(args.common.config.is_none());
        assert!(!args.common.fail_on_error);
        assert_eq!(args.common.format, OutputFormat::Line);
    }

    #[test]
    fn test_parse_watch_interval() {
        let cli = Cli::try_parse_from(["github-stats", "watch", "--interval", "90s", "--cycles", "2"]).unwrap();
        let StatsSubcommand::Watch(args) = cli.command else {
            panic!("expected watch");
        };

        assert_eq!(args.interval, Some(core::time::Duration::from_secs(90)));
        assert_eq!(args.cycles, Some(2));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let _ = Cli::try_parse_from(["github-stats", "gather", "--format", "xml"]).unwrap_err();
    }
}
