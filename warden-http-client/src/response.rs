//! Probe response.

use http::{HeaderMap, StatusCode};
use url::Url;

/// Status line and headers of a probed URL. The body is not read.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
}

impl Response {
    pub(crate) fn from_reqwest(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    /// FTP has no status line; a reachable file or directory reports `200 OK`
    pub(crate) fn from_ftp(url: Url) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            url,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Final URL, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }
}
