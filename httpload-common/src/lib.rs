use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub mod config;

/// Error types for httpload operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpLoadError {
    /// One entry per violated rule, in the order the rules are checked.
    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result type for httpload operations
pub type Result<T> = std::result::Result<T, HttpLoadError>;

/// Immutable parameters of one load run.
///
/// Build it through [`RunConfig::new`]; a value that exists has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    url: String,
    total: usize,
    concurrency: usize,
    timeout: Duration,
}

impl RunConfig {
    /// Validate the inputs and build a config.
    /// Every violated rule is reported, not only the first one.
    pub fn new(url: impl Into<String>, total: usize, concurrency: usize, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let mut problems = Vec::new();
        if url.trim().is_empty() {
            problems.push("URL must not be empty".to_string());
        }
        if total == 0 {
            problems.push("total requests must be greater than zero".to_string());
        }
        if concurrency == 0 {
            problems.push("concurrency must be greater than zero".to_string());
        }
        if timeout.is_zero() {
            problems.push("timeout must be greater than zero".to_string());
        }
        if !problems.is_empty() {
            return Err(HttpLoadError::InvalidConfig(problems));
        }
        Ok(Self { url, total, concurrency, timeout })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Concurrency as requested, before clamping.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of workers actually started: `min(concurrency, total)`.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.min(self.total)
    }
}

/// One HTTP GET, as seen by a worker, split into two phases.
///
/// [`Fetch::send`] resolves as soon as the response headers are in; it is the
/// part a worker times. [`Fetch::drain`] then reads the rest of the body and
/// discards it so the underlying connection can go back to the pool.
pub trait Fetch: Send + Sync {
    /// Unread response body handed from `send` to `drain`.
    type Body: Send;

    /// Send the request and return the status together with the unread body.
    fn send(&self, url: &str) -> impl Future<Output = Result<(u16, Self::Body)>> + Send;

    /// Consume `body` to the end. A failure here fails the whole request.
    fn drain(&self, body: Self::Body) -> impl Future<Output = Result<()>> + Send;
}
