use thiserror::Error;

/// Failures raised inside the transport layer.
///
/// Only [`Error::InvalidEndpoint`] ever reaches a caller; the others are
/// classified by the retry loop and end up as an absent result.
#[derive(Debug, Error)]
pub enum Error {
    /// Endpoint selector outside `info`, `text`, `audio`
    #[error("invalid endpoint '{0}': expected one of \"info\", \"text\", \"audio\"")]
    InvalidEndpoint(String),

    /// Upstream answered with a non-success status code
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// Connection, timeout or body read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl Error {
    /// Determine if an error is retryable (5xx errors, 429 rate limit, connection-level failures).
    /// Other 4xx client errors should not be retried, nor should requests that
    /// could not be built (a malformed base URL fails the same way every time).
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::InvalidEndpoint(_) => false,
            Error::Status(status) => *status == 429 || *status >= 500,
            Error::Network(e) => {
                !e.is_builder() && (e.is_connect() || e.is_timeout() || e.is_request() || e.is_body())
            }
        }
    }
}
