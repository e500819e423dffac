//! Rate-limited HTTP fetcher
//!
//! Every request made by the crawler goes through [`RateLimitedFetcher`], which:
//! - Waits a fixed delay before *every* request, whatever the page type
//! - Identifies itself with a fixed User-Agent string
//! - Issues exactly one GET attempt, with no retries or backoff
//! - Reports network failures and non-success statuses as errors

use crate::config::{Config, UserAgentConfig};
use crate::ScraperError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Source of the pre-request suspension
///
/// Production code uses [`TokioClock`]; tests substitute a manual clock to observe
/// pacing without waiting in real time.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Suspends the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Builds an HTTP client carrying the crawler's identifying User-Agent
///
/// # Example
///
/// ```no_run
/// use archive_harvester::config::UserAgentConfig;
/// use archive_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(config.header_value()).build()
}

/// HTTP fetcher that paces every request with a fixed delay
pub struct RateLimitedFetcher {
    client: Client,
    delay: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimitedFetcher {
    /// Creates a fetcher from the crawler configuration, sleeping on the tokio timer
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        let client = build_http_client(&config.user_agent)?;
        Ok(Self::with_clock(
            client,
            config.crawler.request_delay(),
            Arc::new(TokioClock),
        ))
    }

    /// Creates a fetcher with an explicit client, delay, and clock
    pub fn with_clock(client: Client, delay: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            delay,
            clock,
        }
    }

    /// Returns the fixed pre-request delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fetches a page and returns its body
    ///
    /// # Request Flow
    ///
    /// 1. Log the target URL
    /// 2. Sleep for the fixed delay
    /// 3. Send a single GET request
    /// 4. Reject any non-2xx status
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of a successful response
    /// * `Err(ScraperError::Http)` - Network failure or unreadable body
    /// * `Err(ScraperError::Status)` - Server answered with a non-success status
    pub async fn fetch(&self, url: &Url) -> Result<String, ScraperError> {
        tracing::info!("Sleeping {:?} before requesting {}", self.delay, url);
        self.clock.sleep(self.delay).await;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScraperError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| ScraperError::Http {
            url: url.to_string(),
            source,
        })
    }
}
