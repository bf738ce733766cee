use httpload_common::HttpLoadError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// One request to issue, identified by its index in `0..total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Job(pub usize);

/// Hands out job indices `0..total` to any number of workers.
/// Every index is claimed exactly once.
#[derive(Debug)]
pub struct JobSource {
    next: AtomicUsize,
    total: usize,
}

impl JobSource {
    pub fn new(total: usize) -> Self {
        Self { next: AtomicUsize::new(0), total }
    }

    /// Claim the next unclaimed job; `None` once all `total` have been handed out.
    pub fn claim(&self) -> Option<Job> {
        let total = self.total;
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| (n < total).then_some(n + 1))
            .ok()
            .map(Job)
    }

    /// Jobs handed out so far.
    pub fn claimed(&self) -> usize {
        self.next.load(Ordering::Acquire)
    }
}

/// Outcome of one job: how long the GET took and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    pub job: Job,
    /// Wall time from just before the request was sent until the response
    /// headers arrived or the request failed. Body transfer is not included.
    pub duration: Duration,
    /// The response status, or the transport error that prevented one.
    pub outcome: Result<u16, HttpLoadError>,
}

impl RequestResult {
    pub fn failure(&self) -> Option<&HttpLoadError> {
        self.outcome.as_ref().err()
    }
}
