//! HTTP transport for page fetches.
//!
//! Every request carries the same browser-like headers and a 30 second
//! timeout. Accept-Encoding is left to reqwest so decompression stays on.
//! Network failures and HTTP 429/503 are retried with exponential backoff;
//! anything else that is not a 2xx comes back as a terminal
//! [`ScraperError::Http`].

use std::time::Duration;

use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tokio::time::{Instant, sleep};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::logging::log_error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(100);
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base: Duration,
}

impl Transport {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(default_headers())
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(ScraperError::Client)?;
        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            backoff_base: DEFAULT_BACKOFF_BASE,
        })
    }

    /// Overrides the first retry delay; later retries double it.
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn fetch(&self, path: &str) -> Result<FetchedPage> {
        let url = self.resolve(path)?;
        let mut attempt = 0u32;
        loop {
            let started = Instant::now();
            let outcome = self.get_once(&url).await;
            let error = match outcome {
                Ok((status, body)) => {
                    return Ok(FetchedPage {
                        url: url.to_string(),
                        status,
                        body,
                        duration: started.elapsed(),
                    });
                }
                Err(error) => error,
            };
            if attempt >= self.max_retries || !is_retryable(&error) {
                log_error(&error, url.as_str());
                return Err(error);
            }
            let delay = self.backoff_delay(attempt);
            attempt += 1;
            tracing::warn!(
                url = %url,
                attempt,
                max_retries = self.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying request"
            );
            sleep(delay).await;
        }
    }

    async fn get_once(&self, url: &Url) -> Result<(u16, String)> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ScraperError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status));
        }
        let body = response.text().await.map_err(ScraperError::Network)?;
        Ok((status.as_u16(), body))
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self
            .backoff_base
            .saturating_mul(2u32.saturating_pow(attempt));
        let jitter_ceiling = base.as_millis() as u64 / 5;
        let jitter = if jitter_ceiling == 0 {
            0
        } else {
            rand::rng().random_range(0..=jitter_ceiling)
        };
        base + Duration::from_millis(jitter)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

fn http_error(status: StatusCode) -> ScraperError {
    ScraperError::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
    }
}

fn is_retryable(error: &ScraperError) -> bool {
    match error {
        ScraperError::Http { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
                || *status == StatusCode::SERVICE_UNAVAILABLE.as_u16()
        }
        ScraperError::Network(err) => {
            err.is_connect() || err.is_timeout() || err.is_request() || err.is_body()
        }
        _ => false,
    }
}
