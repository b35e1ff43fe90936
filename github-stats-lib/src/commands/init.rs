use super::Console;
use super::config::{Config, DEFAULT_CONFIG_FILE};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `github-stats.toml`)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn init_config<C: Console>(console: &mut C, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE));

    if output.exists() && !args.force {
        bail!("configuration file '{output}' already exists, use --force to overwrite it");
    }

    Config::save_default(&output)?;
    let _ = writeln!(console.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::console::TestConsole;

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = Utf8PathBuf::from_path_buf(dir.path().join("github-stats.toml")).unwrap();
        let args = InitArgs {
            output: Some(output.clone()),
            force: false,
        };

        let mut console = TestConsole::default();
        init_config(&mut console, &args).unwrap();

        assert!(console.output_str().contains(output.as_str()));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), super::super::config::DEFAULT_CONFIG_TOML);

        let _ = init_config(&mut console, &args).unwrap_err();
    }
}
