use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::job::RequestResult;

/// Upper bound on samples reserved up front; larger runs grow the buffer as results arrive.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 16;

/// Running totals over the results of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    /// Results actually delivered by workers.
    pub received: usize,
    pub errors: usize,
    pub http_200: usize,
    /// Status code -> responses with that code. Successful results only.
    pub status_dist: BTreeMap<u16, usize>,
    /// One entry per successful result, in arrival order (unsorted).
    pub durations: Vec<Duration>,
}

impl Tally {
    pub fn with_capacity(expected: usize) -> Self {
        Self { durations: Vec::with_capacity(expected.min(MAX_INITIAL_CAPACITY)), ..Self::default() }
    }

    pub fn record(&mut self, result: RequestResult) {
        self.received += 1;
        match result.outcome {
            Ok(status) => {
                *self.status_dist.entry(status).or_insert(0) += 1;
                if status == 200 {
                    self.http_200 += 1;
                }
                self.durations.push(result.duration);
            }
            Err(_) => self.errors += 1,
        }
    }

    /// Count results that never arrived as errors, so that
    /// `sum(status_dist) + errors == expected` holds. Returns how many were missing.
    pub fn fill_missing(&mut self, expected: usize) -> usize {
        let missing = expected.saturating_sub(self.received);
        self.errors += missing;
        missing
    }

    /// Successful results seen so far.
    pub fn succeeded(&self) -> usize {
        self.durations.len()
    }
}

/// Receive results until `expected` have arrived or every sender is gone.
///
/// The second condition covers a worker that died mid-job: the channel closes
/// when the last worker exits instead of leaving this waiting forever.
pub async fn collect(results: &mut mpsc::Receiver<RequestResult>, expected: usize) -> Tally {
    let mut tally = Tally::with_capacity(expected);
    while tally.received < expected {
        match results.recv().await {
            Some(result) => tally.record(result),
            None => break,
        }
    }
    tally
}
