//! Status output: one-shot and watch mode.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::status::{StatusRunner, current_time, render_line};

/// Prints the status once.
///
/// Unlike watch mode, a failed refresh is reported as an error.
pub async fn once(
    runner: &StatusRunner,
    now: Option<DateTime<FixedOffset>>,
    json: bool,
) -> ClientResult<()> {
    let state = runner.refresh(now.unwrap_or_else(current_time)).await?;
    println!("{}", render_line(&state, json)?);
    Ok(())
}

/// Refreshes every `interval` and prints the status whenever it changes,
/// until Ctrl-C.
///
/// A failed refresh hides the indicator and the loop carries on.
pub async fn watch(
    runner: &StatusRunner,
    interval: Duration,
    now: Option<DateTime<FixedOffset>>,
    json: bool,
) -> ClientResult<()> {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        source = runner.source_name(),
        interval_secs = interval.as_secs(),
        "Watching calendar"
    );

    let mut last_line: Option<String> = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let state = runner.refresh_or_hidden(now.unwrap_or_else(current_time)).await;
                let line = render_line(&state, json)?;
                if last_line.as_deref() != Some(line.as_str()) {
                    println!("{}", line);
                    last_line = Some(line);
                } else {
                    debug!("Status unchanged");
                }
            }
            result = &mut shutdown => {
                result?;
                info!("Stopping watch");
                break;
            }
        }
    }

    Ok(())
}
