use httpload_common::Fetch;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::job::{Job, JobSource, RequestResult};

/// Spawn `size` workers that drain `jobs` against `url` and send one
/// [`RequestResult`] per job into `results`.
///
/// `results` is moved in and only the workers hold senders afterwards, so the
/// channel closes once every worker has exited.
pub fn spawn_pool<F>(
    fetcher: Arc<F>,
    url: Arc<str>,
    jobs: Arc<JobSource>,
    results: mpsc::Sender<RequestResult>,
    size: usize,
) -> Vec<JoinHandle<()>>
where
    F: Fetch + 'static,
{
    (0..size)
        .map(|id| {
            let worker = Worker {
                id,
                fetcher: Arc::clone(&fetcher),
                url: Arc::clone(&url),
                jobs: Arc::clone(&jobs),
                results: results.clone(),
            };
            tokio::spawn(worker.run())
        })
        .collect()
}

struct Worker<F> {
    id: usize,
    fetcher: Arc<F>,
    url: Arc<str>,
    jobs: Arc<JobSource>,
    results: mpsc::Sender<RequestResult>,
}

impl<F: Fetch + 'static> Worker<F> {
    async fn run(self) {
        tracing::debug!(worker_id = self.id, "Worker started");

        let mut completed: usize = 0;
        let mut errors: usize = 0;

        while let Some(job) = self.jobs.claim() {
            let result = execute_job(self.fetcher.as_ref(), &self.url, job).await;

            if let Some(e) = result.failure() {
                errors += 1;
                tracing::warn!(worker_id = self.id, job = job.0, error = %e, "Request failed");
            }
            completed += 1;

            if self.results.send(result).await.is_err() {
                tracing::debug!(worker_id = self.id, "Result channel closed, worker stopping");
                break;
            }
        }

        tracing::debug!(worker_id = self.id, completed, errors, "Worker finished");
    }
}

/// Issue the GET for `job` and time it. Never fails: a transport error becomes
/// the result's outcome.
///
/// The clock stops once the response headers are in; draining the body comes
/// after and is not part of the recorded latency, though a failed drain still
/// fails the result.
pub async fn execute_job<F: Fetch>(fetcher: &F, url: &str, job: Job) -> RequestResult {
    let start = Instant::now();
    let sent = fetcher.send(url).await;
    let duration = start.elapsed();

    let outcome = match sent {
        Ok((status, body)) => fetcher.drain(body).await.map(|()| status),
        Err(e) => Err(e),
    };
    RequestResult { job, duration, outcome }
}
