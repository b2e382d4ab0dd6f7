//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvest, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for catalog JSON and HTML pages
//! - Per-domain throttling before every request
//! - Error classification
//!
//! No request is retried.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::throttle::Throttle;
use crate::url::DomainAllowList;
use reqwest::redirect::{Attempt, Policy};
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Redirect hops followed before a request is given up
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// Redirects are only followed to hosts on the crawler's allow list; a
/// redirect anywhere else fails the request.
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawler settings (request timeout, allowed domains)
///
/// # Example
///
/// ```no_run
/// use lyrics_harvest::config::{CrawlerConfig, UserAgentConfig};
/// use lyrics_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.request_timeout);

    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .redirect(allow_list_policy(DomainAllowList::new(&crawler.allowed_domains)))
        .build()
}

/// Redirect policy that stops at hosts outside `allow_list`
fn allow_list_policy(allow_list: DomainAllowList) -> Policy {
    Policy::custom(move |attempt: Attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if !allow_list.allows(attempt.url()) {
            let message = format!("redirect to disallowed host: {}", attempt.url());
            attempt.error(message)
        } else {
            attempt.follow()
        }
    })
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Success` with the body |
/// | any other status | `HttpError` |
/// | timeout | `NetworkError` ("Request timeout") |
/// | refused redirect | `NetworkError` (with the reason) |
/// | connection failure | `NetworkError` ("Connection refused") |
/// | body read failure | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: format!("error reading response body: {}", e),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_redirect() {
                let reason = e
                    .source()
                    .map(|source| source.to_string())
                    .unwrap_or_else(|| e.to_string());
                FetchResult::NetworkError {
                    error: format!("Redirect refused: {}", reason),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// HTTP client plus the per-domain throttle
///
/// Every request the harvest makes goes through [`Fetcher::get`], so the
/// delay between two requests to one domain is never shorter than the
/// configured `request-delay`.
pub struct Fetcher {
    client: Client,
    throttle: Throttle,
}

impl Fetcher {
    pub fn new(client: Client, delay: Duration) -> Self {
        Self {
            client,
            throttle: Throttle::new(delay),
        }
    }

    /// Builds the client and throttle from configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        crawler: &CrawlerConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, crawler)?;
        Ok(Self::new(
            client,
            Duration::from_millis(crawler.request_delay),
        ))
    }

    /// Waits for the domain's turn, then fetches `url`
    pub async fn get(&mut self, url: &Url) -> FetchResult {
        self.throttle.wait_turn(url).await;
        tracing::info!("Visiting: {}", url);
        fetch_url(&self.client, url).await
    }

    /// Total requests issued so far
    pub fn requests_made(&self) -> u64 {
        self.throttle.total_requests()
    }
}
