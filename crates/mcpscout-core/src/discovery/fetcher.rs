//! Rate-limited HTTP content fetching.
//!
//! The fetcher never surfaces transport problems to its caller: a timeout, a
//! refused connection, or a non-2xx status all come back as `None`, logged
//! and otherwise swallowed. Upstream pipeline stages treat missing content as
//! a skipped candidate, not a fault.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::rate_limit::RateLimiter;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const TOTAL_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Fetches raw text over HTTP on behalf of one source adapter.
///
/// Single responsibility: HTTP operations only, no parsing or persistence.
/// The `reqwest::Client` is the process-wide transport handle built once at
/// startup; the rate limiter is adapter-local.
pub struct ContentFetcher {
    client: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

impl ContentFetcher {
    pub fn new(client: reqwest::Client, limiter: Arc<RateLimiter>) -> Self {
        Self { client, limiter }
    }

    /// Replace the rate limiter with one using the given interval.
    pub fn with_interval(self, interval: Duration) -> Self {
        Self {
            client: self.client,
            limiter: Arc::new(RateLimiter::new(interval)),
        }
    }

    /// Build the shared HTTP client used by every fetcher in the process.
    pub fn build_client() -> reqwest::Client {
        reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(TOTAL_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client")
    }

    /// Fetch a URL, returning the response body on 2xx and `None` otherwise.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        self.limiter.acquire().await;

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("Fetch of {} returned status {}", url, status);
            return None;
        }

        match response.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read body from {}: {}", url, e);
                None
            }
        }
    }

    /// Fetch a URL and parse the body as JSON.
    ///
    /// Used by adapters talking to platform search APIs. Same silent-absent
    /// semantics as [`fetch`](Self::fetch); a body that is not JSON is logged
    /// and dropped.
    pub async fn fetch_json(&self, url: &str) -> Option<serde_json::Value> {
        self.limiter.acquire().await;

        let response = match self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("Fetch of {} returned status {}", url, status);
            return None;
        }

        match response.json().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Response from {} was not JSON: {}", url, e);
                None
            }
        }
    }
}
