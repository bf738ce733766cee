use httpload_common::config::LATENCY_PERCENTILE;
use serde::Serialize;
use std::time::Duration;

/// Latency summary over successful requests, in milliseconds.
///
/// Every input duration is truncated to whole milliseconds before it takes
/// part in a figure, so `min`, `p95` and `max` are always integral and `mean`
/// is an integral sum divided by the sample count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LatencyStats {
    pub mean_ms: f64,
    pub min_ms: f64,
    pub p95_ms: f64,
    pub max_ms: f64,
}

impl LatencyStats {
    /// Compute the summary for `durations` in any order. All zero when empty.
    pub fn from_durations(durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }
        let mut sorted = durations.to_vec();
        sorted.sort_unstable();

        let sum: Duration = sorted.iter().sum();
        let p95 = sorted[percentile_index(sorted.len(), LATENCY_PERCENTILE)];

        Self {
            mean_ms: whole_millis(sum) as f64 / sorted.len() as f64,
            min_ms: whole_millis(sorted[0]) as f64,
            p95_ms: whole_millis(p95) as f64,
            max_ms: whole_millis(sorted[sorted.len() - 1]) as f64,
        }
    }
}

/// Index into an ascending list of `len` samples for percentile `p`:
/// `floor(len * p) - 1`, clamped to 0.
///
/// This is nearest-rank biased downwards; for 20 samples p95 lands on index 18,
/// not 19.
pub fn percentile_index(len: usize, p: f64) -> usize {
    let rank = (len as f64 * p).floor() as usize;
    rank.saturating_sub(1).min(len.saturating_sub(1))
}

/// `d` in whole milliseconds, truncated.
pub fn whole_millis(d: Duration) -> u64 {
    d.as_millis() as u64
}
