use chrono::Utc;
use httpload_client::{Client, ClientConfig};
use httpload_common::{Fetch, Result, RunConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::collector;
use crate::job::JobSource;
use crate::report::{Report, RunWindow};
use crate::stats::LatencyStats;
use crate::worker;

/// Run `config` against the network with a reqwest client sized for it.
///
/// Only client construction can fail; once requests start, every outcome ends
/// up in the returned report.
pub async fn run_http(config: &RunConfig) -> Result<Report> {
    let client = Client::new(ClientConfig::for_run(config))?;
    Ok(run(config, Arc::new(client)).await)
}

/// Issue `config.total()` GETs through `fetcher` with
/// `config.effective_concurrency()` workers and summarize them.
///
/// Returns only after every worker has exited, so the report never covers a
/// partial result set.
pub async fn run<F: Fetch + 'static>(config: &RunConfig, fetcher: Arc<F>) -> Report {
    let total = config.total();
    let pool_size = config.effective_concurrency();

    tracing::info!(
        url = config.url(),
        total,
        concurrency = pool_size,
        timeout_ms = config.timeout().as_millis() as u64,
        "Starting load run"
    );

    let jobs = Arc::new(JobSource::new(total));
    // Room for every result, so a worker never waits on the collector.
    let (results_tx, mut results_rx) = mpsc::channel(total);

    let started_at = Utc::now();
    let clock = Instant::now();

    let handles = worker::spawn_pool(fetcher, Arc::from(config.url()), Arc::clone(&jobs), results_tx, pool_size);

    let mut tally = collector::collect(&mut results_rx, total).await;
    join_pool(handles).await;

    let elapsed = clock.elapsed();
    let ended_at = Utc::now();

    let missing = tally.fill_missing(total);
    if missing > 0 {
        tracing::error!(
            missing,
            claimed = jobs.claimed(),
            "Results lost to crashed workers, counted as errors"
        );
    }

    let stats = LatencyStats::from_durations(&tally.durations);
    let report = Report::build(config, RunWindow { started_at, ended_at, elapsed }, tally, stats);

    tracing::info!(
        elapsed_secs = elapsed.as_secs_f64(),
        succeeded = report.succeeded(),
        errors = report.errors,
        rps = report.requests_per_sec,
        "Load run completed"
    );

    report
}

/// Wait for every worker to exit. A panicked worker is logged; its lost
/// result is accounted for by the caller.
async fn join_pool(handles: Vec<JoinHandle<()>>) {
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if let Err(e) = handle.await {
            tracing::error!(worker_id, error = %e, "Worker task panicked");
        }
    }
}
