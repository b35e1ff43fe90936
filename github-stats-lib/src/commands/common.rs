//! Common processing logic shared between the gather and watch commands.

use super::Console;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use crate::github::Collector;
use crate::metrics::{COLLECTOR_LOG_TARGET, FacadeLogger, RecordingAccumulator};
use crate::reports::{generate_json, generate_line_protocol};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Args, ValueEnum};
use log::LevelFilter;
use ohno::{IntoAppError, bail};
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "  commands";

/// Format of the collected metrics written to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// InfluxDB line protocol, one line per repository
    Line,

    /// Pretty-printed JSON
    Json,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the gather and watch commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file (default is `github-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// GitHub personal access token, overrides `access_token` from the configuration file
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Format of the collected metrics
    #[arg(long, value_name = "FORMAT", default_value = "line")]
    pub format: OutputFormat,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,

    /// Exit with an error if any repository could not be collected
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Resolve the configuration file path, defaulting to `github-stats.toml` in the current directory
pub fn config_path(config: Option<&Utf8PathBuf>) -> Utf8PathBuf {
    config.cloned().unwrap_or_else(|| Utf8Path::new(DEFAULT_CONFIG_FILE).to_path_buf())
}

/// A loaded configuration together with the collector built from it
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    collector: Collector,
    format: OutputFormat,
    fail_on_error: bool,
}

impl Session {
    /// Load the configuration, set up logging, and create the collector
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the collector cannot be created
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let path = config_path(args.config.as_ref());
        let config = Config::load(&path)?;

        Self::init_logging(args.log_level, config.debug);

        let options = config.collector_options(args.access_token.as_deref());
        let collector = Collector::new(options, Arc::new(FacadeLogger)).into_app_err("creating GitHub client")?;

        Ok(Self {
            config,
            collector,
            format: args.format,
            fail_on_error: args.fail_on_error,
        })
    }

    fn init_logging(log_level: LogLevel, debug: bool) {
        let level = match log_level {
            LogLevel::None => None,
            LogLevel::Error => Some("error"),
            LogLevel::Warn => Some("warn"),
            LogLevel::Info => Some("info"),
            LogLevel::Debug => Some("debug"),
            LogLevel::Trace => Some("trace"),
        };

        let mut builder = match level {
            Some(level) => env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", level)),

            // the debug flag only turns on the collector's own messages
            None if debug => {
                let mut builder = env_logger::Builder::new();
                let _ = builder
                    .filter_level(LevelFilter::Warn)
                    .filter(Some(COLLECTOR_LOG_TARGET), LevelFilter::Debug);
                builder
            }

            None => return,
        };

        let _ = builder
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(debug || matches!(log_level, LogLevel::Debug | LogLevel::Trace));

        // a logger may already be installed when commands run repeatedly in one process
        let _ = builder.try_init();
    }

    /// Run one collection cycle and write its records and errors to the console
    ///
    /// Returns the number of repositories that could not be collected.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle cannot run at all, e.g. because no repositories are configured
    pub async fn run_cycle<C: Console>(&self, console: &mut C) -> Result<usize> {
        let mut acc = RecordingAccumulator::new();
        self.collector.gather(&mut acc).await.into_app_err("collecting repository metrics")?;

        let (records, errors) = acc.into_parts();
        log::debug!(target: LOG_TARGET, "Collected {} record(s), {} error(s)", records.len(), errors.len());

        let mut output = String::new();
        match self.format {
            OutputFormat::Line => generate_line_protocol(&records, Utc::now(), &mut output)?,
            OutputFormat::Json => {
                generate_json(&records, Utc::now(), &mut output)?;
                output.push('\n');
            }
        }

        console.output().write_all(output.as_bytes()).into_app_err("writing collected metrics")?;

        for e in &errors {
            log::error!(target: LOG_TARGET, "Could not collect repository metrics: {e}");
            let _ = writeln!(console.error(), "❌ Could not collect repository metrics: {e}");
        }

        Ok(errors.len())
    }

    /// Turn per-repository failures into an error when `--fail-on-error` is set
    ///
    /// # Errors
    ///
    /// Returns an error if `failures` is non-zero and failing on errors was requested
    pub fn check_failures(&self, failures: usize) -> Result<()> {
        if self.fail_on_error && failures > 0 {
            bail!("{failures} repository(ies) could not be collected");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_default() {
        assert_eq!(config_path(None), "github-stats.toml");
    }

    #[test]
    fn test_config_path_explicit() {
        let path = Utf8PathBuf::from("/etc/github-stats/config.toml");
        assert_eq!(config_path(Some(&path)), path);
    }
}
