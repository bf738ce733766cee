use chrono::{DateTime, Utc};
use httpload_common::RunConfig;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::collector::Tally;
use crate::stats::{whole_millis, LatencyStats};

/// When a run started and stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunWindow {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Monotonic elapsed time; used for throughput instead of the wall-clock difference.
    pub elapsed: Duration,
}

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub url: String,
    pub total_requests: usize,
    /// Effective concurrency: number of workers actually started.
    pub concurrency: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(rename = "total_time_secs", serialize_with = "serialize_secs")]
    pub total_time: Duration,
    pub requests_per_sec: f64,
    pub http_200: usize,
    pub status_dist: BTreeMap<u16, usize>,
    pub errors: usize,
    pub avg_latency_ms: f64,
    pub min_latency_ms: f64,
    pub p95_latency_ms: f64,
    pub max_latency_ms: f64,
    /// Successful-request latencies in whole milliseconds, ascending.
    pub latency_samples_ms: Vec<u64>,
}

impl Report {
    pub fn build(config: &RunConfig, window: RunWindow, tally: Tally, stats: LatencyStats) -> Self {
        let mut latency_samples_ms: Vec<u64> = tally.durations.iter().copied().map(whole_millis).collect();
        latency_samples_ms.sort_unstable();

        Self {
            url: config.url().to_string(),
            total_requests: config.total(),
            concurrency: config.effective_concurrency(),
            start_time: window.started_at,
            end_time: window.ended_at,
            total_time: window.elapsed,
            requests_per_sec: requests_per_sec(config.total(), window.elapsed),
            http_200: tally.http_200,
            status_dist: tally.status_dist,
            errors: tally.errors,
            avg_latency_ms: stats.mean_ms,
            min_latency_ms: stats.min_ms,
            p95_latency_ms: stats.p95_ms,
            max_latency_ms: stats.max_ms,
            latency_samples_ms,
        }
    }

    /// Requests that came back with any HTTP status.
    pub fn succeeded(&self) -> usize {
        self.status_dist.values().sum()
    }
}

/// `total / elapsed` in requests per second. A zero-length run reports `0.0`
/// rather than infinity.
pub fn requests_per_sec(total: usize, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    total as f64 / elapsed.as_secs_f64()
}

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
