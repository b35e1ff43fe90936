use super::Console;
use super::common::{CommonArgs, Session};
use crate::Result;
use clap::Parser;
use core::time::Duration;
use ohno::bail;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "     watch";

#[derive(Parser, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Time between collection cycles, overrides `interval` from the configuration file (e.g. `30s`, `5m`)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Stop after this many cycles instead of running until interrupted
    #[arg(long, value_name = "N")]
    pub cycles: Option<u64>,
}

/// Run collection cycles periodically until interrupted or until `--cycles` is reached
pub async fn watch<C: Console>(console: &mut C, args: &WatchArgs) -> Result<()> {
    let session = Session::new(&args.common)?;

    let period = args.interval.unwrap_or(session.config.interval);
    if period.is_zero() {
        bail!("interval must be greater than zero");
    }

    watch_until(console, &session, period, args.cycles, ctrl_c()).await
}

/// Resolves on the first Ctrl-C, never if no handler can be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!(target: LOG_TARGET, "Could not listen for Ctrl-C: {e}");
        core::future::pending::<()>().await;
    }
}

/// Run cycles every `period` until `shutdown` resolves or `cycles` cycles have completed.
///
/// `shutdown` is polled for the whole run, including while a cycle is in flight; a cycle
/// interrupted that way writes nothing.
async fn watch_until<C, F>(console: &mut C, session: &Session, period: Duration, cycles: Option<u64>, shutdown: F) -> Result<()>
where
    C: Console,
    F: Future<Output = ()>,
{
    log::info!(target: LOG_TARGET, "Collecting every {}", humantime::format_duration(period));

    tokio::pin!(shutdown);

    // the first tick completes immediately
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut completed: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = &mut shutdown => {
                log::info!(target: LOG_TARGET, "Interrupted after {completed} cycle(s)");
                break;
            }
        }

        let failures = tokio::select! {
            result = session.run_cycle(console) => result?,
            () = &mut shutdown => {
                log::info!(target: LOG_TARGET, "Interrupted during cycle {}", completed + 1);
                break;
            }
        };
        session.check_failures(failures)?;

        completed += 1;
        if cycles.is_some_and(|cycles| completed >= cycles) {
            break;
        }
    }

    Ok(())
}
