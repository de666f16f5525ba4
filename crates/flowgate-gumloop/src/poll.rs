//! Run polling.
//!
//! A single linear loop: fetch, decide, sleep. No backoff, no jitter. The
//! timeout is checked between ticks, so a caller may wait up to one extra
//! interval past the budget.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::ProviderError;
use crate::provider::PipelineProvider;
use crate::types::{FlowConfig, RunHandle, RunLookup, RunState};

/// Poll a run until it is DONE, fails, or the timeout is exceeded.
pub async fn poll_until_complete<P>(
    provider: &P,
    lookup: RunLookup<'_>,
    interval: Duration,
    timeout: Duration,
) -> Result<RunState, ProviderError>
where
    P: PipelineProvider + ?Sized,
{
    let started = Instant::now();
    let mut tick: u32 = 0;

    loop {
        tick += 1;
        let run = provider.get_run_status(lookup).await?;
        debug!(run_id = lookup.run_id, tick, state = %run.state, "Polled run");

        if run.state.is_terminal() {
            if run.is_done() {
                info!(run_id = lookup.run_id, ticks = tick, "Run completed");
                return Ok(run);
            }
            warn!(run_id = lookup.run_id, state = %run.state, "Run failed");
            return Err(ProviderError::FlowExecution { state: run.state });
        }

        let elapsed = started.elapsed();
        if elapsed > timeout {
            warn!(
                run_id = lookup.run_id,
                elapsed_ms = elapsed.as_millis() as u64,
                "Polling timeout exceeded"
            );
            return Err(ProviderError::Timeout { elapsed });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Outcome of [`start_and_wait`].
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub handle: RunHandle,
    pub state: RunState,
}

/// Start a flow and poll it to completion using the config's interval and
/// timeout.
pub async fn start_and_wait<P>(
    provider: &P,
    config: &FlowConfig,
) -> Result<CompletedRun, ProviderError>
where
    P: PipelineProvider + ?Sized,
{
    let handle = provider.start_flow(config).await?;
    let state = poll_until_complete(
        provider,
        config.lookup(&handle.run_id),
        config.polling_interval,
        config.timeout,
    )
    .await?;

    Ok(CompletedRun { handle, state })
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
