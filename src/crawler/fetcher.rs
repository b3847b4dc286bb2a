//! HTTP fetcher with rate-limit-aware retry
//!
//! This module wraps the HTTP client with the behavior every request in a
//! crawl shares:
//! - Browser-like headers and fixed timeouts
//! - A one-shot cooldown-and-retry on HTTP 429
//! - Transport error classification
//!
//! Any HTTP response, success or not, is returned as a [`FetchResponse`];
//! callers decide whether a non-2xx status is fatal via
//! [`FetchResponse::ensure_success`]. Only transport-level failures
//! (timeout, connection, DNS) surface as errors here, and those are never
//! retried.

use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Fetch-layer errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// An HTTP response body with its status, regardless of status class
#[derive(Debug)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,

    /// Final URL after redirects
    pub final_url: String,

    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Converts a non-2xx response into [`FetchError::Status`]
    pub fn ensure_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                url: self.final_url,
                status: self.status,
            })
        }
    }

    /// Body decoded as text (lossy; the origin serves UTF-8)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Builds the HTTP client every request of a run goes through
///
/// The origin serves reduced markup to obvious bots, so the client carries
/// the browser-like user agent and accept headers from the configuration.
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher applying the one-shot 429 retry policy
///
/// On HTTP 429 it sleeps the configured cooldown once and retries exactly
/// once; whatever the retry returns (including a second 429) goes back to
/// the caller as a plain response.
pub struct RateLimitedFetcher {
    client: Client,
    cooldown: Duration,
}

impl RateLimitedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            cooldown: Duration::from_secs(config.rate_limit_cooldown_secs),
        })
    }

    /// Wraps an existing client; used by tests to shorten the cooldown
    pub fn with_client(client: Client, cooldown: Duration) -> Self {
        Self { client, cooldown }
    }

    /// Fetches a URL, retrying once after a cooldown if the origin answers 429
    pub async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.get(url).await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS.as_u16() {
            tracing::warn!(
                "HTTP 429 for {}, cooling down {:?} before the single retry",
                url,
                self.cooldown
            );
            tokio::time::sleep(self.cooldown).await;
            return self.get(url).await;
        }

        Ok(response)
    }

    async fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_send_error(url, e)),
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return Err(classify_send_error(url, e)),
        };

        Ok(FetchResponse {
            status,
            final_url,
            body,
        })
    }
}

fn classify_send_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> FetchResponse {
        FetchResponse {
            status,
            final_url: "https://example.com/".to_string(),
            body: b"body".to_vec(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_ensure_success_passes_2xx() {
        assert!(response(200).ensure_success().is_ok());
        assert!(response(204).ensure_success().is_ok());
    }

    #[test]
    fn test_ensure_success_rejects_errors() {
        let err = response(429).ensure_success().unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 429, .. }));

        let err = response(500).ensure_success().unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[test]
    fn test_text_decodes_body() {
        assert_eq!(response(200).text(), "body");
    }
}
