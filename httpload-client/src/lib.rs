use httpload_common::{Fetch, HttpLoadError, Result, RunConfig};
use std::future::Future;
use std::time::Duration;

/// httpload client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Applied to each request as a whole: connect, headers and body.
    pub timeout: Duration,
    /// Idle keep-alive connections retained per host.
    pub max_idle_per_host: usize,
}

impl ClientConfig {
    /// Size the connection pool so every worker of `config` can keep its own
    /// connection alive between requests.
    pub fn for_run(config: &RunConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_idle_per_host: config.effective_concurrency(),
        }
    }
}

/// HTTP client shared by all workers of a run.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone)]
pub struct Client {
    pub config: ClientConfig,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| HttpLoadError::ClientBuild(e.to_string()))?;
        Ok(Self { config, http_client })
    }

    /// Issue one GET against `url` and return its status code once the
    /// response headers have arrived. The body is left unread; pass it to
    /// [`Client::drain`].
    ///
    /// Any status the server sends back, 4xx and 5xx included, is a success
    /// here; only transport failures are errors.
    pub async fn send(&self, url: &str) -> Result<(u16, reqwest::Response)> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        Ok((response.status().as_u16(), response))
    }

    /// Read `response` to the end and discard it. The client timeout still
    /// covers this phase.
    pub async fn drain(&self, mut response: reqwest::Response) -> Result<()> {
        while response.chunk().await.map_err(|e| self.classify(e))?.is_some() {}
        Ok(())
    }

    fn classify(&self, err: reqwest::Error) -> HttpLoadError {
        if err.is_timeout() {
            HttpLoadError::Timeout(self.config.timeout.as_millis() as u64)
        } else if err.is_connect() {
            HttpLoadError::Connect(error_chain(&err))
        } else {
            HttpLoadError::NetworkError(error_chain(&err))
        }
    }
}

impl Fetch for Client {
    type Body = reqwest::Response;

    fn send(&self, url: &str) -> impl Future<Output = Result<(u16, reqwest::Response)>> + Send {
        Client::send(self, url)
    }

    fn drain(&self, body: reqwest::Response) -> impl Future<Output = Result<()>> + Send {
        Client::drain(self, body)
    }
}

/// Flatten `err` and its sources into one line; reqwest's top-level message
/// alone rarely says what actually went wrong.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
