use std::time::Duration;

/// Requests issued when `--requests` is not given.
pub const DEFAULT_TOTAL_REQUESTS: usize = 1;

/// Workers started when `--concurrency` is not given (before clamping to the total).
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Per-request timeout when `--timeout` is not given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Percentile reported alongside min, mean and max.
pub const LATENCY_PERCENTILE: f64 = 0.95;
