//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use super::types::ProviderError;

/// Request header as a `(name, value)` pair.
pub type Header = (String, String);

/// Status and body of a completed request.
///
/// The status is passed through untouched; interpreting it is up to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// Returns `Err` only when no response was received at all (connection
/// refused, timeout, unreadable body). Any status code counts as a response.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request with the given headers.
    fn get(
        &self,
        url: &str,
        headers: &[Header],
    ) -> impl Future<Output = Result<HttpResponse, ProviderError>> + Send;
}

/// Default User-Agent string for HTTP requests.
const DEFAULT_USER_AGENT: &str = concat!("rastertile/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new AsyncReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new AsyncReqwestClient with custom timeout.
    ///
    /// Tiles are small and requested in bursts, so connections are pooled
    /// and kept alive.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create async HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str, headers: &[Header]) -> Result<HttpResponse, ProviderError> {
        trace!(url = url, headers = headers.len(), "HTTP GET request starting");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::HttpError(format!("Request failed: {}", e)));
            }
        };

        let status = response.status().as_u16();

        match response.bytes().await {
            Ok(body) => {
                trace!(url = url, bytes = body.len(), "HTTP response body read");
                Ok(HttpResponse { status, body })
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                Err(ProviderError::HttpError(format!(
                    "Failed to read response: {}",
                    e
                )))
            }
        }
    }
}
