use super::Console;
use super::common::{CommonArgs, Session};
use crate::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct GatherArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run a single collection cycle over every configured repository
pub async fn gather<C: Console>(console: &mut C, args: &GatherArgs) -> Result<()> {
    let session = Session::new(&args.common)?;

    let failures = session.run_cycle(console).await?;
    session.check_failures(failures)
}
