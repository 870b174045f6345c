mod admin;
mod error;
mod family;
mod member;
mod types;

pub use error::HttpStatusError;
pub use types::RetryConfig;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use crate::config::{KioskConfig, TimeoutConfig};
use error::extract_error_message;
use types::USER_AGENT;

/// REST client for the gym backend.
///
/// Implements the domain gateway traits. Reads are retried with exponential
/// backoff; writes are sent exactly once so a check-in is never duplicated.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    retry_config: RetryConfig,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        retry_config: RetryConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {}", base_url);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.http_connect)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            retry_config,
        })
    }

    pub fn from_config(config: &KioskConfig) -> Result<Self> {
        Self::new(
            &config.api.base_url,
            config.retry_config(),
            &TimeoutConfig::from(config),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is percent-encoded,
    /// so emails and ids can be passed as-is.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET and decode JSON, retrying transient failures.
    pub(super) async fn get_json<T>(&self, operation_name: &str, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.execute_with_retry(operation_name, || {
            let client = self.client.clone();
            let url = url.clone();

            async move {
                debug!("[http] GET {}", url);
                let response = client
                    .get(url)
                    .send()
                    .await
                    .context("Failed to send request")?;
                read_json(response).await
            }
        })
        .await
    }

    /// Send a JSON body once and decode the JSON answer.
    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        operation_name: &str,
        url: Url,
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("[http] {} {} op={}", method, url, operation_name);
        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request", operation_name))?;
        read_json(response).await
    }

    /// Execute a request with retry logic
    ///
    /// Retries on:
    /// - Network errors (connection failures, timeouts)
    /// - 5xx server errors
    /// - 429 Too Many Requests
    ///
    /// Does NOT retry on:
    /// - 4xx client errors (except 429)
    /// - Malformed response bodies
    pub(super) async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut request_fn: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match request_fn().await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(
                            "[http] {} succeeded after {} attempts",
                            operation_name, attempt
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry =
                        attempt <= self.retry_config.max_retries && is_retryable_error(&e);

                    if !should_retry {
                        if attempt > 1 {
                            warn!(
                                "[http] {} failed after {} attempts: {:#}",
                                operation_name, attempt, e
                            );
                        }
                        return Err(e);
                    }

                    let backoff_ms = self.retry_config.backoff_for(attempt);
                    warn!(
                        "[http] {} failed attempt={}/{} retry_in_ms={}: {:#}",
                        operation_name,
                        attempt,
                        self.retry_config.max_retries + 1,
                        backoff_ms,
                        e
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                }
            }
        }
    }
}

fn is_retryable_error(error: &anyhow::Error) -> bool {
    if let Some(status_err) = error.downcast_ref::<HttpStatusError>() {
        return status_err.is_retryable();
    }

    if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_connect() || reqwest_err.is_timeout() || reqwest_err.is_request() {
            return true;
        }
        if let Some(status) = reqwest_err.status() {
            return status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
        }
    }

    false
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        return Err(HttpStatusError::new(status, extract_error_message(&body)).into());
    }

    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    // Some writes answer with an empty body
    let body = if body.trim().is_empty() {
        "null".to_string()
    } else {
        body
    };

    serde_json::from_str(&body).with_context(|| {
        format!(
            "Unexpected response body: {}",
            body.chars().take(200).collect::<String>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base_url: &str) -> HttpBackend {
        HttpBackend::new(base_url, RetryConfig::no_retry(), &TimeoutConfig::default()).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let backend = backend("http://127.0.0.1:8000");
        let url = backend
            .endpoint(&["family", "members", "a b/c@example.com"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/family/members/a%20b%2Fc@example.com"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let backend = backend("https://gym.example.com/api/");
        let url = backend.endpoint(&["member", "abc", "stats"]).unwrap();
        assert_eq!(url.as_str(), "https://gym.example.com/api/member/abc/stats");
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let timeouts = TimeoutConfig::default();
        assert!(HttpBackend::new("not a url", RetryConfig::default(), &timeouts).is_err());
        assert!(
            HttpBackend::new("mailto:gym@example.com", RetryConfig::default(), &timeouts).is_err()
        );
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        let not_found: anyhow::Error = HttpStatusError::new(StatusCode::NOT_FOUND, "gone").into();
        let busy: anyhow::Error =
            HttpStatusError::new(StatusCode::TOO_MANY_REQUESTS, "slow down").into();
        assert!(!is_retryable_error(&not_found));
        assert!(is_retryable_error(&busy));
        assert!(!is_retryable_error(&anyhow!("decode failure")));
    }
}
