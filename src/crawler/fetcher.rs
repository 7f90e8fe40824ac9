//! HTTP fetcher implementation
//!
//! This module handles all page requests for the auditor, including:
//! - Building the shared HTTP client with the configured user agent
//! - Following redirects manually so every hop is counted
//! - Per-attempt timeouts and sequential retries
//!
//! Only transport failures (connect errors, timeouts, broken bodies, redirect
//! limits) consume retries. A completed response is an outcome whatever its
//! status code, since a 404 or 500 is itself an audit finding.

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use crate::record::PageStatus;
use reqwest::header::LOCATION;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that make a single fetch attempt fail
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("more than {limit} redirects from {url}")]
    RedirectLimit { url: String, limit: u32 },

    #[error("redirect from {url} has an unusable Location header")]
    BadLocation { url: String },
}

/// Retry and timeout policy applied to every page fetch
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Timeout for one attempt, redirects included
    pub timeout: Duration,
    pub attempts: u32,
    pub retry_delay: Duration,
    pub max_redirects: u32,
}

impl From<&CrawlerConfig> for FetchPolicy {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.request_timeout_ms),
            attempts: config.retry_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            max_redirects: config.max_redirects,
        }
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

/// Result of fetching one page
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Final URL after redirects
    pub final_url: String,
    pub status: PageStatus,
    pub redirect_count: u32,
    /// Raw response body, empty when every attempt failed
    pub body: Vec<u8>,
}

impl FetchOutcome {
    fn failed(url: &str) -> Self {
        Self {
            final_url: url.to_string(),
            status: PageStatus::Error,
            redirect_count: 0,
            body: Vec::new(),
        }
    }
}

/// Formats the user agent header value
///
/// Format: `CrawlerName/Version` or `CrawlerName/Version (+ContactURL)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    match &config.contact_url {
        Some(contact) => format!(
            "{}/{} (+{})",
            config.crawler_name, config.crawler_version, contact
        ),
        None => format!("{}/{}", config.crawler_name, config.crawler_version),
    }
}

/// Builds the HTTP client shared by the resolver and every worker
///
/// # Example
///
/// ```no_run
/// use sitemap_audit::config::Config;
/// use sitemap_audit::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(&config.user_agent))
        .timeout(Duration::from_millis(config.crawler.request_timeout_ms))
        .redirect(Policy::none()) // Handle redirects manually
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page, retrying failed attempts
///
/// Never fails: when the last attempt errors the outcome carries
/// `PageStatus::Error`, an empty body and no redirects.
pub async fn fetch_page(client: &Client, url: &str, policy: &FetchPolicy) -> FetchOutcome {
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        match fetch_once(client, url, policy.timeout, policy.max_redirects).await {
            Ok(outcome) => return outcome,
            Err(e) if attempt < attempts => {
                tracing::debug!(
                    "Attempt {}/{} for {} failed: {}",
                    attempt,
                    attempts,
                    url,
                    e
                );
                if !policy.retry_delay.is_zero() {
                    tokio::time::sleep(policy.retry_delay).await;
                }
            }
            Err(e) => {
                tracing::warn!("Giving up on {} after {} attempts: {}", url, attempts, e);
            }
        }
    }

    FetchOutcome::failed(url)
}

/// Performs one GET attempt bounded by `timeout`, redirects included
pub async fn fetch_once(
    client: &Client,
    url: &str,
    timeout: Duration,
    max_redirects: u32,
) -> Result<FetchOutcome, FetchError> {
    tokio::time::timeout(timeout, follow_redirects(client, url, max_redirects))
        .await
        .unwrap_or(Err(FetchError::Timeout(timeout)))
}

/// Sends GET requests, following redirects up to `max_redirects` hops
async fn follow_redirects(
    client: &Client,
    url: &str,
    max_redirects: u32,
) -> Result<FetchOutcome, FetchError> {
    let mut current = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let mut redirect_count = 0;

    loop {
        let response = client.get(current.clone()).send().await?;
        let status = response.status();

        if status.is_redirection() {
            if let Some(location) = response.headers().get(LOCATION) {
                if redirect_count >= max_redirects {
                    return Err(FetchError::RedirectLimit {
                        url: url.to_string(),
                        limit: max_redirects,
                    });
                }

                let next = location
                    .to_str()
                    .ok()
                    .and_then(|location| current.join(location.trim()).ok())
                    .ok_or_else(|| FetchError::BadLocation {
                        url: current.to_string(),
                    })?;

                tracing::trace!("{} redirects to {}", current, next);
                current = next;
                redirect_count += 1;
                continue;
            }
        }

        let final_url = response.url().to_string();
        let body = response.bytes().await?;

        return Ok(FetchOutcome {
            final_url,
            status: PageStatus::Code(status.as_u16()),
            redirect_count,
            body: body.to_vec(),
        });
    }
}
