use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Public Ergast-compatible F1 API
pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";
pub const DEFAULT_USER_AGENT: &str = "F1-Analytics-Workshop/1.0.0";

/// Errors that can occur when talking to the Ergast API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("Invalid JSON in response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Request(e) => e.is_timeout() || e.is_connect(),
            UpstreamError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            UpstreamError::Decode(_) => false,
        }
    }
}

/// Construction parameters for [`ErgastClient`]
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff: Duration::from_millis(250),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Read access to the upstream statistics API
///
/// Route handlers only see this trait, so tests can swap in a double.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Base URL reported by the health check
    fn base_url(&self) -> &str;

    /// GET `{base_url}/{fragment}` and return the decoded JSON body
    async fn fetch(&self, fragment: &str) -> Result<Value, UpstreamError>;
}

/// Ergast API client
///
/// Wraps a pooled reqwest client carrying the service `User-Agent`. Safe to
/// share across workers.
pub struct ErgastClient {
    config: UpstreamConfig,
    client: Client,
}

impl ErgastClient {
    /// Create a new Ergast client
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Full URL for an endpoint fragment; leading slashes are dropped
    pub fn url_for(&self, fragment: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            fragment.trim_start_matches('/')
        )
    }

    async fn get_once(&self, url: &str, timeout: Duration) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// Delay before retry number `attempt + 1`, doubling from `base`
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.checked_mul(2u32.saturating_pow(attempt))
        .unwrap_or(Duration::MAX)
}

#[async_trait]
impl UpstreamClient for ErgastClient {
    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Retries share one deadline: the configured timeout bounds the whole
    /// call, not each attempt.
    async fn fetch(&self, fragment: &str) -> Result<Value, UpstreamError> {
        let url = self.url_for(fragment);
        let deadline = Instant::now() + self.config.timeout;
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!("GET {} (attempt {})", url, attempt + 1);

            let remaining = deadline.saturating_duration_since(Instant::now());
            let err = match self.get_once(&url, remaining).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            if !err.is_transient() || attempt >= self.config.max_retries {
                return Err(err);
            }

            let delay = backoff_delay(self.config.retry_backoff, attempt);
            let remaining = deadline.saturating_duration_since(Instant::now());
            if delay >= remaining {
                tracing::warn!(
                    "Ergast request to {} failed ({}), no time left to retry",
                    url,
                    err
                );
                return Err(err);
            }

            attempt += 1;
            tracing::warn!(
                "Ergast request to {} failed ({}), retry {}/{} in {:?}",
                url,
                err,
                attempt,
                self.config.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}
