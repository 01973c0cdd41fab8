// Reachability primitive

use thiserror::Error;

/// Why a reachability fetch failed.
///
/// URL validators treat every variant the same way: one recorded failure.
/// The variants exist for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("unsuccessful response status {0}")]
    Status(u16),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Other(String),
}

/// Opens a URL and reports whether it could be fetched.
///
/// Implementations block the calling thread for one request and never
/// retry.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<(), FetchError>;
}

/// [`Fetch`] backed by a closure
#[derive(Clone, Copy)]
pub struct FnFetcher<F>(F);

impl<F> Fetch for FnFetcher<F>
where
    F: Fn(&str) -> Result<(), FetchError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<(), FetchError> {
        (self.0)(url)
    }
}

/// Wrap a closure as a fetcher.
///
/// ```
/// use warden_validation::{Fetch, FetchError, fetcher_fn};
///
/// let offline = fetcher_fn(|url: &str| Err(FetchError::Connection(url.to_string())));
/// assert!(offline.fetch("http://example.com").is_err());
/// ```
pub fn fetcher_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(&str) -> Result<(), FetchError> + Send + Sync,
{
    FnFetcher(f)
}

#[cfg(feature = "http-client")]
mod http {
    use super::{Fetch, FetchError};
    use warden_http_client::{HttpClient, HttpClientError};

    impl From<HttpClientError> for FetchError {
        fn from(error: HttpClientError) -> Self {
            if error.is_timeout() {
                return FetchError::Timeout;
            }
            if let Some(status) = error.status_code() {
                return FetchError::Status(status);
            }
            match error {
                HttpClientError::InvalidUrl(url) => FetchError::InvalidUrl(url),
                HttpClientError::UrlParse(e) => FetchError::InvalidUrl(e.to_string()),
                e if e.is_connection() => FetchError::Connection(e.to_string()),
                e => FetchError::Other(e.to_string()),
            }
        }
    }

    impl Fetch for HttpClient {
        fn fetch(&self, url: &str) -> Result<(), FetchError> {
            self.probe(url).map(|_| ()).map_err(FetchError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fetcher_fn() {
        let calls = AtomicUsize::new(0);
        let fetcher = fetcher_fn(|url: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            if url.ends_with(".invalid/") {
                Err(FetchError::Connection("dns".into()))
            } else {
                Ok(())
            }
        });

        assert!(fetcher.fetch("http://www.google.com").is_ok());
        assert!(fetcher.fetch("http://nonexistent.invalid/").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[cfg(feature = "http-client")]
    #[test]
    fn test_from_http_client_error() {
        use warden_http_client::HttpClientError;

        let status = HttpClientError::Response {
            status: 404,
            message: "Not Found".into(),
        };
        assert_eq!(FetchError::from(status), FetchError::Status(404));

        let invalid = HttpClientError::InvalidUrl("nope".into());
        assert_eq!(FetchError::from(invalid), FetchError::InvalidUrl("nope".into()));

        let timeout = HttpClientError::Timeout(std::time::Duration::from_secs(1));
        assert_eq!(FetchError::from(timeout), FetchError::Timeout);
    }
}
