// ABOUTME: Outbound HTTP client with timeouts and exponential-backoff retries
// ABOUTME: Retries transient statuses and transport failures with a per-request attempt counter

use crate::config::HttpClientConfig;
use crate::constants::http_client::RETRYABLE_STATUS_CODES;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Build a `reqwest::Client` with the configured timeouts
#[must_use]
pub fn create_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// When and how long to wait before re-sending a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Upper bound for a single delay
    pub max_backoff: Duration,
    /// Statuses that trigger a retry
    pub retryable_status_codes: Vec<StatusCode>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HttpClientConfig::default())
    }
}

impl RetryPolicy {
    /// Policy from the HTTP client configuration
    #[must_use]
    pub fn from_config(config: &HttpClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.retry_base_delay_ms),
            max_backoff: Duration::from_millis(config.retry_max_delay_ms),
            retryable_status_codes: RETRYABLE_STATUS_CODES
                .iter()
                .filter_map(|code| StatusCode::from_u16(*code).ok())
                .collect(),
        }
    }

    /// A policy that never retries
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            retryable_status_codes: Vec::new(),
        }
    }

    /// Delay before retry number `attempt` (1-based): `initial * 2^(attempt-1)`, capped
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Whether a response status is worth retrying
    #[must_use]
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Whether a transport error is worth retrying
    #[must_use]
    pub fn is_retryable_error(error: &reqwest::Error) -> bool {
        error.is_timeout() || error.is_connect()
    }
}

/// HTTP client that re-sends transient failures according to a [`RetryPolicy`]
#[derive(Debug, Clone)]
pub struct ResilientClient {
    client: Client,
    policy: RetryPolicy,
}

impl ResilientClient {
    /// Client with timeouts and retry policy from configuration
    #[must_use]
    pub fn new(config: &HttpClientConfig) -> Self {
        Self {
            client: create_client(config),
            policy: RetryPolicy::from_config(config),
        }
    }

    /// Client with an explicit policy
    #[must_use]
    pub const fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Underlying `reqwest` client
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Active retry policy
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send a request, rebuilding it for each attempt.
    ///
    /// Once retries are exhausted the last response is returned as-is so the
    /// caller can read its status and body.
    ///
    /// # Errors
    ///
    /// Returns the transport error of the final attempt, or any
    /// non-retryable transport error immediately
    pub async fn send<F>(&self, build: F) -> Result<Response, reqwest::Error>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let mut attempt: u32 = 0;

        loop {
            match build(&self.client).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !self.policy.is_retryable_status(status)
                        || attempt >= self.policy.max_retries
                    {
                        return Ok(response);
                    }
                    attempt += 1;
                    let backoff = self.policy.backoff_for(attempt);
                    warn!(
                        "Request to {} returned {status} - retry {attempt}/{} after {}ms",
                        response.url(),
                        self.policy.max_retries,
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    if !RetryPolicy::is_retryable_error(&e) || attempt >= self.policy.max_retries {
                        debug!("Request failed without further retries: {e}");
                        return Err(e);
                    }
                    attempt += 1;
                    let backoff = self.policy.backoff_for(attempt);
                    warn!(
                        "Request failed ({e}) - retry {attempt}/{} after {}ms",
                        self.policy.max_retries,
                        backoff.as_millis()
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}
