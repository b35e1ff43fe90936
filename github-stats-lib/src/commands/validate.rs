use super::Console;
use super::common::config_path;
use super::config::Config;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `github-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file and checks every repository identifier
fn validate_config_inner(path: &Utf8Path) -> Result<Config> {
    let config = Config::load(path)?;

    let invalid = config.invalid_repos();
    if !invalid.is_empty() {
        bail!("invalid repository identifier(s), expected '<owner>/<name>': {}", invalid.join(", "));
    }

    Ok(config)
}

pub fn validate_config<C: Console>(console: &mut C, args: &ValidateArgs) -> Result<()> {
    let path = config_path(args.config.as_ref());

    match validate_config_inner(&path) {
        Ok(config) => {
            let mut out = console.output();
            let _ = writeln!(out, "Configuration file is valid");
            let _ = writeln!(out, "Config file: {path}");
            let _ = writeln!(out, "Repositories: {}", config.repos.len());

            if config.repos.is_empty() {
                drop(out);
                let _ = writeln!(console.error(), "⚠️ No repositories configured, gathering will fail");
            }

            Ok(())
        }
        Err(e) => {
            let _ = writeln!(console.error(), "❌ Configuration validation failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::console::TestConsole;

    fn validate_text(text: &str) -> (Result<()>, TestConsole) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("github-stats.toml")).unwrap();
        std::fs::write(&path, text).unwrap();

        let mut console = TestConsole::default();
        let result = validate_config(&mut console, &ValidateArgs { config: Some(path) });
        (result, console)
    }

    #[test]
    fn test_validate_reports_repository_count() {
        let (result, console) = validate_text("repos = [\"influxdata/telegraf\", \"tokio-rs/tokio\"]\n");

        result.unwrap();
        assert!(console.output_str().contains("Repositories: 2"));
        assert!(console.error_str().is_empty());
    }

    #[test]
    fn test_validate_warns_about_empty_repository_list() {
        let (result, console) = validate_text("repos = []\n");

        result.unwrap();
        assert!(console.error_str().contains("No repositories configured"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let (result, console) = validate_text("repos = [\"a/b\"]\ntimeout = 0\n");

        let _ = result.unwrap_err();
        assert!(console.error_str().contains("Configuration validation failed"));
    }
}
