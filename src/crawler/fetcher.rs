//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with the browser-like user agent
//! - GET requests for listing and article pages
//! - Bounded retry on non-success responses and transport errors
//! - Classification of the final failure

use crate::config::{FetchConfig, UserAgentConfig};
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Every attempt ended with a non-success HTTP status
    HttpError {
        /// Status code of the last attempt
        status_code: u16,
        /// Number of requests sent
        attempts: u32,
    },

    /// The last attempt failed below HTTP (connection refused, timeout, body read)
    NetworkError {
        /// Error description
        error: String,
        /// Number of requests sent
        attempts: u32,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Number of requests that were sent to produce this result
    pub fn attempts(&self) -> Option<u32> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { attempts, .. } | Self::NetworkError { attempts, .. } => {
                Some(*attempts)
            }
        }
    }

    /// Converts the result into the page body, or a fetch error for `url`
    pub fn into_body(self, url: &str) -> Result<String, HarvestError> {
        match self {
            Self::Success { body, .. } => Ok(body),
            Self::HttpError {
                status_code,
                attempts,
            } => Err(HarvestError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {} after {} attempts", status_code, attempts),
            }),
            Self::NetworkError { error, attempts } => Err(HarvestError::Fetch {
                url: url.to_string(),
                reason: format!("{} after {} attempts", error, attempts),
            }),
        }
    }
}

/// How often and how patiently a failed request is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Pause before each retry
    pub delay: Duration,
}

impl RetryPolicy {
    /// Total number of requests the policy allows for one URL
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.retry_delay(),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `timeout` - Optional per-request timeout
///
/// # Example
///
/// ```no_run
/// use habr_harvest::config::UserAgentConfig;
/// use habr_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), None).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    timeout: Option<Duration>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.value.as_str())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches a URL, retrying failed attempts according to `policy`
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | Any other HTTP status | Retry, same request |
/// | Transport error | Retry, same request |
/// | Attempts exhausted | Log error, return failure |
///
/// Client and server errors are not distinguished and no backoff is
/// applied beyond the policy's fixed delay.
///
/// # Returns
///
/// A FetchResult indicating success or the type of the last failure.
/// This function never returns an `Err`; callers decide how to treat a
/// failed fetch.
pub async fn fetch_page(client: &Client, url: &str, policy: &RetryPolicy) -> FetchResult {
    let total_attempts = policy.total_attempts();
    let mut attempt = 1;

    loop {
        let result = fetch_once(client, url, attempt).await;

        if result.is_success() {
            return result;
        }

        if attempt >= total_attempts {
            match &result {
                FetchResult::HttpError { status_code, .. } => tracing::error!(
                    "Unable to fetch {}: HTTP {} after {} attempts",
                    url,
                    status_code,
                    attempt
                ),
                FetchResult::NetworkError { error, .. } => tracing::error!(
                    "Unable to fetch {}: {} after {} attempts",
                    url,
                    error,
                    attempt
                ),
                FetchResult::Success { .. } => {}
            }
            return result;
        }

        if !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }

        tracing::info!("Retry {} / {} for {}", attempt, policy.max_retries, url);
        attempt += 1;
    }
}

/// Sends a single GET request and classifies the outcome
async fn fetch_once(client: &Client, url: &str, attempt: u32) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::debug!("Request to {} failed: {}", url, error);
            return FetchResult::NetworkError {
                error,
                attempts: attempt,
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} responded with HTTP {}", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
            attempts: attempt,
        };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            status_code: status.as_u16(),
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
            attempts: attempt,
        },
    }
}
