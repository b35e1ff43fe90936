//! Collects popularity and usage metrics for GitHub repositories.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use github_stats_lib::{Console, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Console writing to the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct StdConsole;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Console for StdConsole {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut StdConsole, std::env::args()).await
}
