//! HTTP client wrapper for metadata requests.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};

use crate::error::MetadataError;

/// Connect timeout for metadata requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Read timeout for metadata requests.
pub const READ_TIMEOUT: Duration = Duration::from_millis(2000);

/// Largest metadata value accepted, in bytes.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// HTTP client wrapper for metadata service requests.
///
/// Every request is best-effort: any failure, including a status other than
/// 200, is reported as `None`. Probing an endpoint that does not exist outside
/// its cloud is the expected case, not a fault.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    inner: Client,
}

impl MetadataClient {
    /// Create a new metadata client with the given connect and read timeouts.
    ///
    /// The total request deadline is the sum of both.
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, MetadataError> {
        let inner = Client::builder()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .timeout(connect_timeout + read_timeout)
            .build()?;
        Ok(Self { inner })
    }

    /// Create a new metadata client with the default timeouts.
    pub fn with_default_timeouts() -> Result<Self, MetadataError> {
        Self::new(CONNECT_TIMEOUT, READ_TIMEOUT)
    }

    /// Issue a single request and return the body on 200 OK.
    pub async fn fetch(&self, url: &str, method: Method, headers: &[(&str, &str)]) -> Option<String> {
        match self.try_fetch(url, method.clone(), headers).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(%url, %method, error = %e, "metadata request yielded no value");
                None
            }
        }
    }

    /// `GET` shorthand for [`fetch`](Self::fetch).
    pub async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Option<String> {
        self.fetch(url, Method::GET, headers).await
    }

    /// `PUT` shorthand for [`fetch`](Self::fetch).
    pub async fn put(&self, url: &str, headers: &[(&str, &str)]) -> Option<String> {
        self.fetch(url, Method::PUT, headers).await
    }

    async fn try_fetch(
        &self,
        url: &str,
        method: Method,
        headers: &[(&str, &str)],
    ) -> Result<String, MetadataError> {
        let mut request = self.inner.request(method, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MetadataError::Http(status.as_u16()));
        }

        let body = read_body_limited(response, MAX_BODY_SIZE).await?;
        String::from_utf8(body).map_err(|_| MetadataError::Utf8)
    }
}

/// Read a response body, failing once it exceeds `max_size` bytes.
///
/// `Content-Length` is checked first so an oversized body is rejected before
/// any of it is read; the streamed length is checked as well since the header
/// may be missing or wrong.
async fn read_body_limited(response: Response, max_size: usize) -> Result<Vec<u8>, MetadataError> {
    if let Some(content_length) = response.content_length() {
        if content_length as usize > max_size {
            return Err(MetadataError::TooLarge(content_length as usize, max_size));
        }
    }

    let capacity = response
        .content_length()
        .map(|cl| (cl as usize).min(max_size))
        .unwrap_or(max_size.min(1024));
    let mut body = Vec::with_capacity(capacity);

    let mut stream = response;
    while let Some(chunk) = stream.chunk().await? {
        let total = body.len().saturating_add(chunk.len());
        if total > max_size {
            return Err(MetadataError::TooLarge(total, max_size));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        assert_eq!(CONNECT_TIMEOUT, Duration::from_millis(2000));
        assert_eq!(READ_TIMEOUT, Duration::from_millis(2000));
    }

    #[test]
    fn test_client_creation() {
        assert!(MetadataClient::with_default_timeouts().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_none() {
        let client =
            MetadataClient::new(Duration::from_millis(200), Duration::from_millis(200)).unwrap();
        let started = std::time::Instant::now();

        // Port 1 on loopback is never listening.
        let body = client.get("http://127.0.0.1:1/latest/meta-data/instance-id", &[]).await;

        assert!(body.is_none());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_malformed_url_yields_none() {
        let client = MetadataClient::with_default_timeouts().unwrap();
        assert!(client.get("not a url", &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_header_yields_none() {
        let client = MetadataClient::with_default_timeouts().unwrap();
        let body = client
            .get("http://127.0.0.1:1/", &[("bad header name", "value")])
            .await;
        assert!(body.is_none());
    }
}
