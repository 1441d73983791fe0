//! HTTP client for the hosted data API, with retry and backoff.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use quill_core::error::RepoError;

/// Retry policy for transient failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.min(16)))
    }
}

/// Data API connection configuration.
#[derive(Debug, Clone)]
pub struct DataApiConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Static key sent as `apikey` and as the bearer token.
    pub api_key: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl DataApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Whether repeating a request can apply its effect twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Idempotency {
    Safe,
    /// Only retried when the server provably did not process it.
    Unsafe,
}

/// PostgREST-style client: `/rest/v1/<table>` with query-string filters.
///
/// Every request carries the static credential pair. Transient failures
/// (connect errors, timeouts, 429, 5xx) are retried per [`RetryPolicy`];
/// anything else, and the last transient failure, is returned to the caller.
#[derive(Debug, Clone)]
pub struct DataApiClient {
    http: reqwest::Client,
    config: DataApiConfig,
}

impl DataApiClient {
    pub fn new(config: DataApiConfig) -> Result<Self, RepoError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| RepoError::Network(format!("invalid api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| RepoError::Network(format!("invalid api key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| RepoError::Network(format!("failed to build http client: {e}")))?;

        tracing::info!(base_url = %config.base_url, "Data API client ready");

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DataApiConfig {
        &self.config
    }

    fn url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url.trim_end_matches('/'), table)
    }

    pub(crate) fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http.request(method, self.url(table))
    }

    /// GET rows of `table` matching `query`.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RepoError> {
        let request = self.request(Method::GET, table).query(query);
        let response = self.execute(request, Idempotency::Safe).await?;
        decode(response).await
    }

    /// POST a row and return the stored representation.
    pub(crate) async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, RepoError> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.execute(request, Idempotency::Unsafe).await?;
        decode(response).await
    }

    /// PATCH rows matching `query`, returning the updated rows.
    pub(crate) async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<Vec<T>, RepoError> {
        let request = self
            .request(Method::PATCH, table)
            .query(query)
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.execute(request, Idempotency::Safe).await?;
        decode(response).await
    }

    /// DELETE rows matching `query`, returning the deleted rows.
    pub(crate) async fn remove<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RepoError> {
        let request = self
            .request(Method::DELETE, table)
            .query(query)
            .header("Prefer", "return=representation");
        let response = self.execute(request, Idempotency::Safe).await?;
        decode(response).await
    }

    /// Send with retries. Only success statuses come back as `Ok`.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        idempotency: Idempotency,
    ) -> Result<Response, RepoError> {
        let policy = self.config.retry;
        let mut retry = 0;

        loop {
            let attempt = request
                .try_clone()
                .ok_or_else(|| RepoError::Network("request cannot be retried".to_string()))?;

            let (err, retryable) = match attempt.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let err = rejection(response).await;
                    let retryable = err.is_transient()
                        && (idempotency == Idempotency::Safe
                            || status == StatusCode::TOO_MANY_REQUESTS
                            || status == StatusCode::SERVICE_UNAVAILABLE);
                    (err, retryable)
                }
                Err(e) => {
                    let retryable = idempotency == Idempotency::Safe || e.is_connect();
                    (RepoError::Network(e.to_string()), retryable)
                }
            };

            if !retryable || retry >= policy.max_retries {
                tracing::warn!(attempts = retry + 1, error = %err, "Data API request failed");
                return Err(err);
            }

            let delay = policy.backoff(retry);
            tracing::debug!(
                retry = retry + 1,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying data API request"
            );
            tokio::time::sleep(delay).await;
            retry += 1;
        }
    }
}

async fn rejection(response: Response) -> RepoError {
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND => RepoError::NotFound,
        StatusCode::CONFLICT => RepoError::Duplicate(detail),
        _ => RepoError::Rejected {
            status: status.as_u16(),
            detail,
        },
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, RepoError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RepoError::Network(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes).map_err(|e| RepoError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(200),
        };
        assert_eq!(policy.backoff(0), Duration::from_millis(200));
        assert_eq!(policy.backoff(1), Duration::from_millis(400));
        assert_eq!(policy.backoff(2), Duration::from_millis(800));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = DataApiClient::new(DataApiConfig::new("https://example.test/", "key")).unwrap();
        assert_eq!(client.url("posts"), "https://example.test/rest/v1/posts");
    }

    #[test]
    fn test_rejects_api_key_with_control_characters() {
        assert!(DataApiClient::new(DataApiConfig::new("https://example.test", "bad\nkey")).is_err());
    }
}
