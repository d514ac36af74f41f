//! Error types for metadata requests.
//!
//! These never reach callers of the detector: every variant collapses to
//! "no value" at the [`MetadataClient`](crate::MetadataClient) boundary and is
//! only surfaced in debug logs.

use thiserror::Error;

/// Errors that can occur while querying a metadata endpoint.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Endpoint answered with something other than 200 OK.
    #[error("http {0}")]
    Http(u16),

    /// Connect or read deadline elapsed.
    #[error("request timeout")]
    Timeout,

    /// HTTP request error (DNS, refused connection, invalid header, ...).
    #[error("request failed: {0}")]
    Request(reqwest::Error),

    /// Response was not valid UTF-8.
    #[error("invalid utf-8")]
    Utf8,

    /// Response exceeds maximum allowed size.
    #[error("response too large: {0} bytes exceeds limit of {1} bytes")]
    TooLarge(usize, usize),
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MetadataError::Timeout
        } else {
            MetadataError::Request(err)
        }
    }
}
